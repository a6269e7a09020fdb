//! Output formats shared by the scan and batch commands.

use rcpt_core::ScanResponse;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON confirmation payload
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing one output per input.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_response(response: &ScanResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

fn format_csv(response: &ScanResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["product_name", "purchase_date", "brand"])?;
    wtr.write_record([
        &response.editable.product_name,
        &response.editable.purchase_date,
        &response.editable.brand,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &ScanResponse) -> String {
    let fields = &response.editable;
    let date = if fields.purchase_date.is_empty() {
        "(not found)"
    } else {
        fields.purchase_date.as_str()
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", response.message));
    output.push_str(&format!("Product: {}\n", fields.product_name));
    output.push_str(&format!("Brand:   {}\n", fields.brand));
    output.push_str(&format!("Date:    {}\n", date));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcpt_core::ExtractionResult;

    fn response() -> ScanResponse {
        ScanResponse::from(ExtractionResult {
            product_name: "Samsung Galaxy S10".to_string(),
            purchase_date: "2019-10-28".to_string(),
            brand: "Croma".to_string(),
            raw_text: "Croma Retail".to_string(),
        })
    }

    #[test]
    fn test_csv() {
        let csv = format_response(&response(), OutputFormat::Csv).unwrap();
        assert_eq!(csv, "product_name,purchase_date,brand\nSamsung Galaxy S10,2019-10-28,Croma\n");
    }

    #[test]
    fn test_text_missing_date() {
        let mut response = response();
        response.editable.purchase_date.clear();

        let text = format_response(&response, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Confirm extracted data"));
        assert!(text.contains("Date:    (not found)"));
    }
}
