//! Top pages report.

use std::path::Path;
use tracing::{info, warn};

use super::CommandHandler;
use crate::auth::ANALYTICS_READONLY_SCOPE;
use crate::error::{CommandError, CommandResult};
use crate::models::{ReportRequest, ReportRow};
use crate::store::SERVICE_ACCOUNT_PATH_KEY;

impl CommandHandler<'_> {
    /// Fetch and print the most viewed pages of the last seven days.
    ///
    /// Preconditions are checked in order (view id, configured path, key file
    /// on disk) and none of them touches the network. Rows are only printed
    /// once the whole report has been received, so a service failure never
    /// leaves partial output behind.
    pub async fn fetch(&self, view_id: Option<&str>) -> CommandResult<()> {
        let view_id = match view_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(CommandError::MissingViewId),
        };

        let key_file_path = self.resolve_key_file()?;

        let rows = self
            .run_report(view_id, Path::new(&key_file_path))
            .await
            .map_err(|e| {
                warn!(view_id, error = %e, "Report request failed");
                CommandError::fetch(e)
            })?;

        if rows.is_empty() {
            self.output.success("No data found for the specified period.");
            return Ok(());
        }

        self.output.log("Top 5 Posts (Last 7 Days):");
        for line in format_rows(&rows) {
            self.output.log(&line);
        }

        self.output.success("Data retrieved successfully!");
        Ok(())
    }

    /// Base path joined with the stored entry by plain concatenation.
    fn resolve_key_file(&self) -> CommandResult<String> {
        let stored = self
            .store
            .get(SERVICE_ACCOUNT_PATH_KEY)
            .map_err(CommandError::Settings)?
            .filter(|p| !p.is_empty())
            .ok_or(CommandError::NotConfigured)?;

        let resolved = format!("{}{}", self.base_path, stored);
        if !Path::new(&resolved).is_file() {
            return Err(CommandError::KeyFileNotFound { path: resolved });
        }

        Ok(resolved)
    }

    async fn run_report(&self, view_id: &str, key_file: &Path) -> anyhow::Result<Vec<ReportRow>> {
        let client = self.connector.connect(key_file, ANALYTICS_READONLY_SCOPE).await?;
        let rows = client.batch_get(ReportRequest::top_pages(view_id)).await?;
        info!(view_id, rows = rows.len(), "Top pages fetched");
        Ok(rows)
    }
}

/// `"<rank>. <page path> - <views> views"`, ranked from 1 in input order.
pub fn format_rows(rows: &[ReportRow]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| format!("{}. {} - {} views", index + 1, row.page_path, row.views))
        .collect()
}
