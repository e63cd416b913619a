//! Recording `CommandRunner` for tests, shared with the server crate through
//! the `test-support` feature.
//!
//! `RecordingRunner` records every invocation and replays canned responses
//! in order; once they run out, the last response repeats. Failures are
//! reported against the program that was actually invoked.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Mutex;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProcessOutput};
use crate::domain::{EnvironmentOverrides, ProcessError};

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub env: EnvironmentOverrides,
}

impl Call {
    /// Program and args joined by spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub type Response = std::result::Result<Vec<u8>, ProcessError>;

pub struct RecordingRunner {
    responses: Mutex<Vec<Response>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRunner {
    /// # Panics
    ///
    /// Panics if `responses` is empty.
    #[must_use]
    pub fn with_responses(responses: Vec<Response>) -> Self {
        assert!(!responses.is_empty(), "at least one response is required");
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn ok(output: &[u8]) -> Self {
        Self::with_responses(vec![Ok(output.to_vec())])
    }

    #[must_use]
    pub fn failing(output: &[u8]) -> Self {
        Self::with_responses(vec![Err(failed("command", output))])
    }

    #[must_use]
    pub fn timing_out() -> Self {
        Self::with_responses(vec![Err(ProcessError::TimedOut {
            program: "command".to_string(),
            secs: 600,
        })])
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

/// A `ProcessError::Failed` with exit code 1.
#[must_use]
pub fn failed(program: &str, output: &[u8]) -> ProcessError {
    ProcessError::Failed {
        program: program.to_string(),
        code: Some(1),
        output: String::from_utf8_lossy(output).into_owned(),
    }
}

fn clone_response(response: &Response) -> Response {
    match response {
        Ok(bytes) => Ok(bytes.clone()),
        Err(ProcessError::Failed {
            program,
            code,
            output,
        }) => Err(ProcessError::Failed {
            program: program.clone(),
            code: *code,
            output: output.clone(),
        }),
        Err(ProcessError::TimedOut { program, secs }) => Err(ProcessError::TimedOut {
            program: program.clone(),
            secs: *secs,
        }),
    }
}

// Canned failures carry a placeholder program; report the one actually run.
fn invoked_as(err: ProcessError, program: &str) -> ProcessError {
    match err {
        ProcessError::Failed { code, output, .. } => ProcessError::Failed {
            program: program.to_string(),
            code,
            output,
        },
        ProcessError::TimedOut { secs, .. } => ProcessError::TimedOut {
            program: program.to_string(),
            secs,
        },
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &EnvironmentOverrides,
    ) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            env: env.clone(),
        });
        let response = {
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                clone_response(&responses[0])
            }
        };
        match response {
            Ok(output) => Ok(ProcessOutput { output }),
            Err(err) => Err(invoked_as(err, program).into()),
        }
    }
}
