//! Line normalization shared by every extractor.

/// Receipt text split into usable lines plus a lowercase copy for keyword scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText<'a> {
    /// Trimmed, non-blank lines in their original top-to-bottom order.
    pub lines: Vec<&'a str>,
    /// The whole input lowercased.
    pub lower: String,
}

impl<'a> NormalizedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Self {
            lines,
            lower: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped() {
        let text = "  AMAZON.IN \n\n   \r\nInvoice\r\n\tItem 1\n";
        let normalized = NormalizedText::new(text);

        assert_eq!(normalized.lines, vec!["AMAZON.IN", "Invoice", "Item 1"]);
        assert!(normalized.lower.contains("amazon.in"));
    }

    #[test]
    fn test_empty_input() {
        let normalized = NormalizedText::new("");

        assert!(normalized.is_empty());
        assert_eq!(normalized.lower, "");
    }
}
