use crate::core::errors::Result;

/// MIME type of every generated report.
pub const CSV_MIME: &str = "text/csv";

/// A fully materialised CSV report: filename, header row and data rows.
///
/// Reports are built completely before anything is written to the
/// client, so a failure never leaves a truncated file behind.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvReport {
    pub filename: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvReport {
    pub fn new(filename: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            filename: filename.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Value for the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment;filename={}", self.filename)
    }

    /// Serialize header and rows as comma-separated values.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| crate::core::errors::AdminError::Io(e.into_error()))
    }
}
