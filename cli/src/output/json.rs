//! JSON output helpers.

use anyhow::{Context, Result};
use sandbox_common::types::PodStatus;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "output": "..."
/// }
/// ```
///
/// `output` is `null` when no process output was captured.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, output: Option<&str>) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "output": output,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain values as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_sandboxes(&self, sandboxes: &[String]) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(sandboxes).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_pod_statuses(&self, statuses: &[PodStatus]) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(statuses).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Emit `{"text": ...}`, matching the HTTP response shape.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_process_output(&self, text: &str) -> Result<()> {
        let body = sandbox_common::types::TextBody {
            text: text.to_string(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_failure(&self, message: &str, output: Option<&str>) -> Result<()> {
        println!("{}", format_error(message, output)?);
        Ok(())
    }

    pub fn render_version(&self, version: &str) {
        println!(r#"{{"version":"{version}"}}"#);
    }
}
