//! Version command

use crate::output::Renderer;

/// Run the version command.
pub fn run(renderer: &Renderer<'_>) {
    renderer.render_version(env!("CARGO_PKG_VERSION"));
}
