//! GitHub Actions workflow commands.

/// Escape a message for use as workflow command data.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::error::` line that marks the step failed in the Actions UI.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report a failure to the runner. The caller still has to exit non-zero.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}
