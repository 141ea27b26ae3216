//! Interactive setup of the service-account key path.

use std::io::{BufRead, Write};
use tracing::info;

use super::CommandHandler;
use crate::error::{CommandError, CommandResult};
use crate::store::SERVICE_ACCOUNT_PATH_KEY;

const PATH_PROMPT: &str = "Enter the path to your service account JSON file (relative to ABSPATH)";

impl CommandHandler<'_> {
    /// Prompt for the key file path and store it.
    ///
    /// The trimmed answer is saved as-is: empty or nonexistent paths are
    /// accepted here and only rejected later by `fetch`.
    pub fn configure<R: BufRead, W: Write>(&self, input: R, prompt: W) -> CommandResult<()> {
        self.output
            .log(&format!("Current ABSPATH is: {}", self.base_path));

        let key_file_path = prompt_user(PATH_PROMPT, input, prompt)?;

        self.store
            .set(SERVICE_ACCOUNT_PATH_KEY, &key_file_path)
            .map_err(CommandError::Settings)?;

        info!(path = %key_file_path, "Service account path configured");
        self.output.success(&format!(
            "Configuration saved! Service account path is set to: {}",
            key_file_path
        ));
        Ok(())
    }
}

/// Write `message: ` and read one trimmed line. End of input reads as empty.
fn prompt_user<R: BufRead, W: Write>(message: &str, mut input: R, mut prompt: W) -> std::io::Result<String> {
    write!(prompt, "{}: ", message)?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
