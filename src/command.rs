//! External command invocation
//!
//! Runs a fixed command synchronously (from the request's point of view) and
//! captures its standard output. Failures are best effort: a command that
//! cannot be launched or exits non-zero still yields whatever stdout it
//! produced, possibly nothing. No timeout is applied.

use tokio::process::Command;

use crate::logger;

/// Run `argv` to completion and return its captured stdout.
///
/// The output is decoded lossily and returned as-is, trailing newline
/// included. An empty argv or a launch failure returns an empty string.
pub async fn run_command(argv: &[String]) -> String {
    let Some((program, args)) = argv.split_first() else {
        logger::log_warning("Route has an empty command, returning empty output");
        return String::new();
    };

    match Command::new(program).args(args).output().await {
        Ok(output) => {
            if !output.status.success() {
                logger::log_warning(&format!(
                    "Command '{program}' exited with {}, embedding captured output anyway",
                    output.status
                ));
            }
            String::from_utf8_lossy(&output.stdout).into_owned()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to launch '{program}': {e}"));
            String::new()
        }
    }
}
