//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! `domain` stays pure, `infra` owns all process and environment access, and
//! commands render through `app.renderer()`.

use std::path::Path;

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

// ── Rendering goes through the renderer ───────────────────────────────────────

#[test]
fn no_inline_json_branching_in_commands() {
    let commands_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("commands");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&commands_dir) {
        let lines = read_non_comment_lines(&file);
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        for (i, line) in lines.iter().enumerate() {
            let lineno = i + 1;
            if line.contains("json: bool") {
                violations.push(format!(
                    "{rel}:{lineno}: found `json: bool` parameter: {line}"
                ));
            }
            let trimmed = line.trim();
            if trimmed.starts_with("if json") || trimmed.starts_with("if !json") {
                violations.push(format!("{rel}:{lineno}: found inline JSON branch: {line}"));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found inline JSON branching in commands/ — use app.renderer() instead:\n{}",
        violations.join("\n")
    );
}

// ── Runner construction stays in infra ────────────────────────────────────────

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src_dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .to_string_lossy()
            .to_string();
        let rel_normalized = rel.replace('\\', "/");
        if rel_normalized.contains("/infra/") || rel_normalized.ends_with("app.rs")
        {
            continue;
        }

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if line.contains("TokioCommandRunner::new") {
                violations.push(format!(
                    "{rel}:{}: TokioCommandRunner::new outside infra/: {line}",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found TokioCommandRunner::new outside infra/ — commands must use the runner held by AppContext:\n{}",
        violations.join("\n")
    );
}

// ── Trait bounds over concrete types ──────────────────────────────────────────

#[test]
fn no_concrete_runner_types_in_service_signatures() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let infra_dir = src_dir.join("infra");
    let services_dir = src_dir.join("application").join("services");

    let concrete_types = ["TokioCommandRunner>", "TokioCommandRunner,"];

    let mut violations: Vec<String> = Vec::new();

    for dir in [&infra_dir, &services_dir] {
        check_concrete_types_in_dir(dir, &concrete_types, &mut violations);
    }

    assert!(
        violations.is_empty(),
        "Found concrete runner types in service/infra function signatures — use trait bounds instead:\n{}",
        violations.join("\n")
    );
}

fn check_concrete_types_in_dir(dir: &Path, concrete_types: &[&str], violations: &mut Vec<String>) {
    for file in collect_rs_files(dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("fn ") {
                continue;
            }
            for concrete in concrete_types {
                if line.contains(concrete) {
                    violations.push(format!(
                        "{rel}:{}: concrete type `{concrete}` in function signature: {line}",
                        i + 1
                    ));
                }
            }
        }
    }
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let infra_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("infra");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&infra_dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            if line.contains("crate::commands") || line.contains("crate::output") {
                violations.push(format!(
                    "{rel}:{}: forbidden import in infra/: {line}",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let infra_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("infra");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&infra_dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };

        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            if line.contains("println!") || line.contains("eprintln!") {
                violations.push(format!(
                    "{rel}:{}: print macro in infra/ outside #[cfg(test)]: {line}",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        violations.join("\n")
    );
}

// ── Domain purity ─────────────────────────────────────────────────────────────

#[test]
fn domain_does_no_io() {
    let domain_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("domain");

    let forbidden = ["tokio::", "std::process", "std::env::var", "std::fs::", "tracing::"];
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&domain_dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();

        let lines = read_non_comment_lines(&file);
        for (i, line) in lines.iter().enumerate() {
            for needle in &forbidden {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: `{needle}` in domain/: {line}", i + 1));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O:\n{}",
        violations.join("\n")
    );
}

#[test]
fn environment_is_read_only_by_infra_config() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src_dir) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        if rel.ends_with("infra/config.rs") || rel.ends_with("infra/logging.rs") {
            continue;
        }

        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            if in_test || line.trim().starts_with("//") {
                continue;
            }
            if line.contains("std::env::var") || line.contains("envy::from_env") {
                violations.push(format!("{rel}:{}: environment read: {line}", i + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Only infra/config.rs may read the process environment:\n{}",
        violations.join("\n")
    );
}
