//! `GET /`: a minimal HTML page listing the current sandboxes.

use std::fmt::Write as _;

use axum::extract::State;
use axum::response::Html;
use sandbox_deploy::application::CommandRunner;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn sandboxes_page<R: CommandRunner>(
    State(state): State<AppState<R>>,
) -> Result<Html<String>, ApiError> {
    let sandboxes = state.actions.list_sandboxes().await?;
    Ok(Html(render(&sandboxes)))
}

fn render(sandboxes: &[String]) -> String {
    let mut page = String::from(
        "<!doctype html>\n<html>\n<head><title>Sandboxes</title></head>\n<body>\n<h1>Sandboxes</h1>\n",
    );
    if sandboxes.is_empty() {
        page.push_str("<p>No sandboxes.</p>\n");
    } else {
        page.push_str("<ul>\n");
        for name in sandboxes {
            let _ = writeln!(page, "  <li>{}</li>", escape(name));
        }
        page.push_str("</ul>\n");
    }
    page.push_str("</body>\n</html>\n");
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
