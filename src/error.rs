//! Errors reported at the command boundary.
//!
//! Every variant renders the exact operator-facing message. Plumbing below
//! the handler uses `anyhow` and is folded into [`CommandError::Fetch`] or
//! [`CommandError::Settings`] before it reaches the operator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("View ID is required. Use --view-id=<VIEW_ID>")]
    MissingViewId,

    #[error("Service account path is not configured. Run \"wp gatop --configure\" to set it up.")]
    NotConfigured,

    #[error("Service account key file not found at: {path}")]
    KeyFileNotFound { path: String },

    #[error("Error fetching data: {0}")]
    Fetch(String),

    #[error("Settings store error: {0:#}")]
    Settings(anyhow::Error),

    #[error("Failed to read operator input: {0}")]
    Prompt(#[from] std::io::Error),
}

impl CommandError {
    /// Wrap a reporting-service failure, keeping the full context chain.
    pub fn fetch(err: anyhow::Error) -> Self {
        CommandError::Fetch(format!("{:#}", err))
    }
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_messages_are_verbatim() {
        assert_eq!(
            CommandError::MissingViewId.to_string(),
            "View ID is required. Use --view-id=<VIEW_ID>"
        );
        assert_eq!(
            CommandError::NotConfigured.to_string(),
            "Service account path is not configured. Run \"wp gatop --configure\" to set it up."
        );
        assert_eq!(
            CommandError::KeyFileNotFound { path: "/srv/site/key.json".to_string() }.to_string(),
            "Service account key file not found at: /srv/site/key.json"
        );
    }

    #[test]
    fn test_fetch_keeps_context_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("401 Unauthorized"));
        let err = err.context("Token exchange failed").unwrap_err();
        assert_eq!(
            CommandError::fetch(err).to_string(),
            "Error fetching data: Token exchange failed: 401 Unauthorized"
        );
    }
}
