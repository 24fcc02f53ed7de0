//! HTML → PDF conversion backends.
//!
//! `AppState` carries an `Arc<dyn PdfConverter>`. The default backend runs an
//! external converter program once per call in its own temp directory, so calls
//! never share converter state. A semaphore caps how many processes run at once.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::render::export::ExportError;

const INPUT_FILE: &str = "resume.html";
const OUTPUT_FILE: &str = "resume.pdf";

/// Raw outcome of one conversion, before the exporter decides whether to trust it.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    pub pdf: Vec<u8>,
    /// The converter's own success flag.
    pub success: bool,
    pub diagnostics: Vec<String>,
}

#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Converts a complete HTML document. `Err` is reserved for failures to run
    /// the converter at all; converter-reported problems go in the report.
    async fn convert(&self, markup: &str) -> Result<ConversionReport, ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// ProcessPdfConverter
// ────────────────────────────────────────────────────────────────────────────

/// Runs `program args...` with `{input}` / `{output}` placeholders substituted
/// by the temp HTML and PDF paths.
pub struct ProcessPdfConverter {
    program: String,
    args: Vec<String>,
    permits: Arc<Semaphore>,
}

impl ProcessPdfConverter {
    pub fn new(program: impl Into<String>, args: Vec<String>, max_concurrency: usize) -> Self {
        Self {
            program: program.into(),
            args,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

fn io_failure(stage: &str, err: std::io::Error) -> ExportError {
    ExportError::ConversionFailed {
        detail: format!("{stage}: {err}"),
    }
}

#[async_trait]
impl PdfConverter for ProcessPdfConverter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn convert(&self, markup: &str) -> Result<ConversionReport, ExportError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ExportError::ConversionFailed {
                detail: "converter pool is closed".to_string(),
            })?;

        let workdir = tempfile::tempdir().map_err(|e| io_failure("creating temp dir", e))?;
        let input = workdir.path().join(INPUT_FILE);
        let output = workdir.path().join(OUTPUT_FILE);
        tokio::fs::write(&input, markup.as_bytes())
            .await
            .map_err(|e| io_failure("writing markup", e))?;

        let args = self.expand_args(&input, &output);
        debug!(program = %self.program, ?args, "spawning PDF converter");

        // kill_on_drop: a timed-out caller drops this future and takes the child with it.
        let result = Command::new(&self.program)
            .args(&args)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| io_failure(&format!("running {}", self.program), e))?;

        let diagnostics: Vec<String> = String::from_utf8_lossy(&result.stderr)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if !result.status.success() {
            warn!(program = %self.program, status = %result.status, "PDF converter exited with failure");
            let mut diagnostics = diagnostics;
            diagnostics.push(format!("converter exited with {}", result.status));
            return Ok(ConversionReport {
                pdf: Vec::new(),
                success: false,
                diagnostics,
            });
        }

        let pdf = match tokio::fs::read(&output).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(ConversionReport {
                    pdf: Vec::new(),
                    success: false,
                    diagnostics: vec![format!("reading converter output: {e}")],
                })
            }
        };

        Ok(ConversionReport {
            pdf,
            success: true,
            diagnostics,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test backends
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod testing {
    use std::time::Duration;

    use super::*;

    /// Returns a fixed report for every call.
    pub struct StaticConverter(pub ConversionReport);

    impl StaticConverter {
        pub fn ok(pdf: &[u8]) -> Self {
            Self(ConversionReport {
                pdf: pdf.to_vec(),
                success: true,
                diagnostics: vec![],
            })
        }

        pub fn failing(diagnostic: &str) -> Self {
            Self(ConversionReport {
                pdf: b"%PDF-1.4 partial".to_vec(),
                success: false,
                diagnostics: vec![diagnostic.to_string()],
            })
        }
    }

    #[async_trait]
    impl PdfConverter for StaticConverter {
        fn name(&self) -> &str {
            "static"
        }

        async fn convert(&self, _markup: &str) -> Result<ConversionReport, ExportError> {
            Ok(self.0.clone())
        }
    }

    /// Sleeps before answering, for timeout tests under paused time.
    pub struct SlowConverter(pub Duration);

    #[async_trait]
    impl PdfConverter for SlowConverter {
        fn name(&self) -> &str {
            "slow"
        }

        async fn convert(&self, _markup: &str) -> Result<ConversionReport, ExportError> {
            tokio::time::sleep(self.0).await;
            Ok(ConversionReport {
                pdf: b"%PDF-1.4 late".to_vec(),
                success: true,
                diagnostics: vec![],
            })
        }
    }
}
