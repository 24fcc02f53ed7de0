//! Document Exporter — turns composed markup into an HTTP-deliverable artifact.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};

use crate::render::converter::PdfConverter;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";
const FILENAME_FALLBACK: &str = "Resume";
const FILENAME_SUFFIX: &str = "_Resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF conversion failed: {detail}")]
    ConversionFailed { detail: String },

    #[error("PDF conversion timed out after {0:?}")]
    Timeout(Duration),
}

/// Print-view payload: the markup plus the content type to serve it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintView {
    pub html: String,
    pub content_type: &'static str,
}

/// Wraps print-mode markup for the browser. Never fails.
pub fn render_for_print(markup: String) -> PrintView {
    PrintView {
        html: markup,
        content_type: HTML_CONTENT_TYPE,
    }
}

/// Stateless apart from the shared converter handle. Nothing is cached.
#[derive(Clone)]
pub struct Exporter {
    converter: Arc<dyn PdfConverter>,
}

impl Exporter {
    pub fn new(converter: Arc<dyn PdfConverter>) -> Self {
        Self { converter }
    }

    /// Converts export-mode markup to PDF bytes, bounded by `timeout`.
    ///
    /// Bytes are only returned when the converter flagged success and produced
    /// something that starts like a PDF. No retries.
    pub async fn render_for_download(
        &self,
        markup: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, ExportError> {
        let report = match tokio::time::timeout(timeout, self.converter.convert(markup)).await {
            Ok(result) => result?,
            Err(_) => {
                error!(converter = self.converter.name(), ?timeout, "PDF conversion timed out");
                return Err(ExportError::Timeout(timeout));
            }
        };

        if !report.success {
            let detail = if report.diagnostics.is_empty() {
                "converter reported an error without diagnostics".to_string()
            } else {
                report.diagnostics.join("; ")
            };
            error!(converter = self.converter.name(), %detail, "PDF conversion failed");
            return Err(ExportError::ConversionFailed { detail });
        }

        if !report.pdf.starts_with(PDF_MAGIC) {
            let detail = if report.pdf.is_empty() {
                "converter produced no output".to_string()
            } else {
                "converter output is not a PDF".to_string()
            };
            error!(converter = self.converter.name(), %detail, "PDF conversion failed");
            return Err(ExportError::ConversionFailed { detail });
        }

        info!(
            converter = self.converter.name(),
            bytes = report.pdf.len(),
            "PDF generated"
        );
        Ok(report.pdf)
    }
}

/// Attachment filename from the resume's full name: spaces become underscores,
/// path separators, quotes and control characters are dropped, `_Resume.pdf` appended.
pub fn attachment_filename(full_name: Option<&str>) -> String {
    let stem: String = full_name
        .unwrap_or("")
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' | '\\' | '"' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    let stem = if stem.trim_matches('_').is_empty() {
        FILENAME_FALLBACK
    } else {
        stem.as_str()
    };
    format!("{stem}{FILENAME_SUFFIX}")
}

/// `Content-Disposition` value. Non-ASCII names get an ASCII fallback plus an
/// RFC 5987 `filename*` parameter.
pub fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        percent_encode(filename)
    )
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
