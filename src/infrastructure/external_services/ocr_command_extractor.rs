use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::fs;
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::prescription_extractor::{
    ExtractedPrescription, ExtractionError, ExtractionJob, PrescriptionExtractor,
};

pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

// `ValueError: boom`, `requests.exceptions.HTTPError: 502`
static EXCEPTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*: ").expect("exception prefix pattern is valid")
});

#[derive(Debug, Clone)]
pub struct OcrCommandConfig {
    pub program: String,
    /// May contain `{input}` and `{output}`, substituted per request.
    pub args: Vec<String>,
    pub output_dir: PathBuf,
}

/// Runs an external OCR program against a stored upload.
///
/// The program receives the image path and a per-upload output path, both as
/// argument placeholders and as `OCR_INPUT_PATH` / `OCR_OUTPUT_PATH` in its
/// environment. It must write its JSON result to the output path and exit 0.
/// On a non-zero exit the last line of stderr becomes the error message, with
/// a leading exception class (`ValueError: `) removed.
pub struct OcrCommandExtractor {
    config: OcrCommandConfig,
}

impl OcrCommandExtractor {
    pub fn new(config: OcrCommandConfig) -> Self {
        Self { config }
    }

    pub async fn ensure_output_dir(&self) -> Result<(), ExtractionError> {
        fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| ExtractionError::IoError(e.to_string()))
    }

    fn output_path(&self, upload_id: Uuid) -> PathBuf {
        self.config.output_dir.join(format!("{}.json", upload_id))
    }

    fn render_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }

    fn failure_message(status: std::process::ExitStatus, stderr: &[u8]) -> String {
        let stderr = String::from_utf8_lossy(stderr);
        stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| EXCEPTION_PREFIX.replace(line, "").into_owned())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("OCR command exited with {}", status))
    }
}

#[async_trait]
impl PrescriptionExtractor for OcrCommandExtractor {
    async fn extract(
        &self,
        job: &ExtractionJob,
    ) -> Result<ExtractedPrescription, ExtractionError> {
        let output_path = self.output_path(job.upload_id);
        let args = self.render_args(&job.image_path, &output_path);

        tracing::debug!(
            "Running OCR command {} {:?} for upload {}",
            self.config.program,
            args,
            job.upload_id
        );

        let output = Command::new(&self.config.program)
            .args(&args)
            .env("OCR_INPUT_PATH", &job.image_path)
            .env("OCR_OUTPUT_PATH", &output_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ExtractionError::IoError(format!(
                    "Failed to run OCR command `{}`: {}",
                    self.config.program, e
                ))
            })?;

        if !output.status.success() {
            let _ = fs::remove_file(&output_path).await;
            return Err(ExtractionError::Failed(Self::failure_message(
                output.status,
                &output.stderr,
            )));
        }

        let raw_json = fs::read_to_string(&output_path).await.map_err(|e| {
            ExtractionError::IoError(format!(
                "Failed to read OCR output {}: {}",
                output_path.display(),
                e
            ))
        })?;

        if let Err(e) = fs::remove_file(&output_path).await {
            tracing::warn!(
                "Could not remove OCR output {}: {}",
                output_path.display(),
                e
            );
        }

        Ok(ExtractedPrescription { raw_json })
    }
}
