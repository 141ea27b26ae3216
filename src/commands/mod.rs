//! Command module for gatop
//!
//! [`CommandHandler`] carries the two operations the CLI exposes,
//! `configure` and `fetch`. It owns no state of its own: the credential path
//! lives in a [`SettingsStore`], network work goes through a
//! [`ReportingConnector`], and everything the operator sees goes to an
//! [`Output`]. Failures are returned as [`CommandError`] for the caller to
//! report through [`Output::error`].
//!
//! [`CommandError`]: crate::error::CommandError

pub mod configure;
pub mod fetch;

use crate::output::Output;
use crate::reporting::ReportingConnector;
use crate::store::SettingsStore;

pub struct CommandHandler<'a> {
    store: &'a dyn SettingsStore,
    connector: &'a dyn ReportingConnector,
    output: &'a dyn Output,
    base_path: String,
}

impl<'a> CommandHandler<'a> {
    pub fn new(
        store: &'a dyn SettingsStore,
        connector: &'a dyn ReportingConnector,
        output: &'a dyn Output,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            connector,
            output,
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}
