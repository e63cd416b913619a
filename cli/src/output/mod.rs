//! Output formatting module

pub mod human;
pub mod json;
pub mod styles;

use anyhow::Result;
use console::Term;
use sandbox_common::types::PodStatus;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and terminal state.
    ///
    /// `NO_COLOR` is honoured through the clap `env` binding on `--no-color`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors = !no_color && Term::stdout().is_term();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }
}

/// Dispatches rendering to the human or JSON renderer.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_sandboxes(&self, sandboxes: &[String]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_sandboxes(sandboxes);
                Ok(())
            }
            Self::Json(r) => r.render_sandboxes(sandboxes),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_pod_statuses(&self, statuses: &[PodStatus]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_pod_statuses(statuses);
                Ok(())
            }
            Self::Json(r) => r.render_pod_statuses(statuses),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_process_output(&self, text: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_process_output(text);
                Ok(())
            }
            Self::Json(r) => r.render_process_output(text),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_failure(&self, message: &str, output: Option<&str>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_failure(message, output);
                Ok(())
            }
            Self::Json(r) => r.render_failure(message, output),
        }
    }

    pub fn render_version(&self, version: &str) {
        match self {
            Self::Human(r) => r.render_version(version),
            Self::Json(r) => r.render_version(version),
        }
    }
}
