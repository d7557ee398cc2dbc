//! External process execution.

use super::ExtractError;
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Runs a command to completion, capturing its output.
///
/// The child is killed if `cancel` fires before it exits.
pub(super) async fn run(
    program: &'static str,
    mut command: Command,
    cancel: &CancellationToken,
) -> Result<Output, ExtractError> {
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ExtractError::Cancelled),
        result = output => result.map_err(|source| ExtractError::Spawn { program, source }),
    }
}

/// Returns the trimmed stderr of a finished command.
pub(super) fn stderr_message(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
