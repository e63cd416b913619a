//! Human-readable terminal renderer.

use std::fmt::Write as _;

use owo_colors::OwoColorize as _;
use sandbox_common::types::PodStatus;

use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// One sandbox name per line.
    pub fn render_sandboxes(&self, sandboxes: &[String]) {
        if self.ctx.quiet {
            return;
        }
        for sandbox in sandboxes {
            println!("{sandbox}");
        }
    }

    /// One pod per line: user, app, phase, latest condition, then failing
    /// condition messages if any.
    pub fn render_pod_statuses(&self, statuses: &[PodStatus]) {
        if self.ctx.quiet {
            return;
        }
        for pod in statuses {
            println!("{}", format_pod_line(self.ctx, pod));
        }
    }

    /// Print captured process output verbatim.
    pub fn render_process_output(&self, text: &str) {
        if self.ctx.quiet {
            return;
        }
        print!("{text}");
        if !text.is_empty() && !text.ends_with('\n') {
            println!();
        }
    }

    /// Print captured output (if any) followed by an `ERROR:` line on stderr.
    /// Never suppressed.
    pub fn render_failure(&self, message: &str, output: Option<&str>) {
        if let Some(text) = output.filter(|t| !t.is_empty()) {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        eprintln!("{} {message}", "ERROR:".style(self.ctx.styles.error));
    }

    pub fn render_version(&self, version: &str) {
        println!("sandbox-deploy {version}");
    }
}

fn format_pod_line(ctx: &OutputContext, pod: &PodStatus) -> String {
    let status = pod.status.as_deref().unwrap_or("-");
    let mut line = format!(
        "{:<16} {:<12} {:<10} {}",
        pod.user,
        pod.app,
        pod.phase,
        status.style(ctx.styles.bold)
    );
    if pod.error {
        let _ = write!(
            line,
            "  {} {}",
            "✗".style(ctx.styles.error),
            pod.messages.style(ctx.styles.dim)
        );
    }
    line
}
