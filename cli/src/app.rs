//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()` from the parsed flags and the
//! startup `Settings`, and passed as `&AppContext` to all command handlers.

use crate::application::{CommandRunner, SandboxActions};
use crate::domain::Settings;
use crate::infra::TokioCommandRunner;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

impl OutputFlags {
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    #[must_use]
    pub fn output_context(&self) -> OutputContext {
        OutputContext::new(self.no_color, self.quiet)
    }
}

/// Renderer for `mode` drawing on `output` for styling.
#[must_use]
pub fn renderer(mode: OutputMode, output: &OutputContext) -> Renderer<'_> {
    match mode {
        OutputMode::Human => Renderer::Human(HumanRenderer::new(output)),
        OutputMode::Json => Renderer::Json(JsonRenderer),
    }
}

/// Unified application context passed to every command handler.
pub struct AppContext<R: CommandRunner = TokioCommandRunner> {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Sandbox operations.
    pub actions: SandboxActions<R>,
}

impl AppContext<TokioCommandRunner> {
    /// Construct the production context: a tokio runner bounded by the
    /// configured timeout.
    #[must_use]
    pub fn new(flags: &OutputFlags, settings: Settings) -> Self {
        let runner = TokioCommandRunner::new(settings.timeout);
        Self::with_actions(flags, SandboxActions::new(runner, settings))
    }
}

impl<R: CommandRunner> AppContext<R> {
    /// Construct a context around existing actions (used by tests).
    #[must_use]
    pub fn with_actions(flags: &OutputFlags, actions: SandboxActions<R>) -> Self {
        Self {
            output: flags.output_context(),
            mode: flags.mode(),
            actions,
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        renderer(self.mode, &self.output)
    }
}
