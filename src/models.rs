//! Reporting data models
//!
//! Wire types for the Analytics Reporting API v4 `reports:batchGet` call and
//! the flattened [`ReportRow`] the command prints.
//!
//! ## Request
//!
//! [`ReportRequest::top_pages`] builds the only request this tool issues:
//! page views per page path over the trailing seven days, sorted descending,
//! limited to [`TOP_PAGES_LIMIT`] rows. It is wrapped in a
//! [`GetReportsRequest`] before being sent.
//!
//! ## Response
//!
//! [`GetReportsResponse::into_rows`] reads the first report's rows and keeps
//! the first dimension and the first metric value of each, in the order the
//! service returned them.

use serde::{Deserialize, Serialize};

pub const PAGEVIEWS_METRIC: &str = "ga:pageviews";
pub const PAGE_PATH_DIMENSION: &str = "ga:pagePath";
pub const TOP_PAGES_LIMIT: u32 = 5;

/// One ranked line of output: a page path and its view count as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub page_path: String,
    pub views: String,
}

impl ReportRow {
    pub fn new(page_path: impl Into<String>, views: impl Into<String>) -> Self {
        Self {
            page_path: page_path.into(),
            views: views.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    /// Seven days back through today, in the service's relative date syntax.
    pub fn trailing_week() -> Self {
        Self {
            start_date: "7daysAgo".to_string(),
            end_date: "today".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<DateRange>,
    pub metrics: Vec<Metric>,
    pub dimensions: Vec<Dimension>,
    pub order_bys: Vec<OrderBy>,
    pub page_size: u32,
}

impl ReportRequest {
    /// Top pages by views for `view_id` over the trailing week.
    pub fn top_pages(view_id: &str) -> Self {
        Self {
            view_id: view_id.to_string(),
            date_ranges: vec![DateRange::trailing_week()],
            metrics: vec![Metric {
                expression: PAGEVIEWS_METRIC.to_string(),
            }],
            dimensions: vec![Dimension {
                name: PAGE_PATH_DIMENSION.to_string(),
            }],
            order_bys: vec![OrderBy {
                field_name: PAGEVIEWS_METRIC.to_string(),
                sort_order: SortOrder::Descending,
            }],
            page_size: TOP_PAGES_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsRequest {
    pub report_requests: Vec<ReportRequest>,
}

impl From<ReportRequest> for GetReportsRequest {
    fn from(request: ReportRequest) -> Self {
        Self {
            report_requests: vec![request],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub data: ReportData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportData {
    // The service omits `rows` entirely when there is no data.
    #[serde(default)]
    pub rows: Vec<ApiReportRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReportRow {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}

impl GetReportsResponse {
    /// Flatten the first report into printable rows.
    ///
    /// Fails if a row lacks its page path or view count, since the request
    /// always asks for exactly one of each.
    pub fn into_rows(self) -> anyhow::Result<Vec<ReportRow>> {
        let Some(report) = self.reports.into_iter().next() else {
            anyhow::bail!("response contained no reports");
        };

        report
            .data
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let page_path = row
                    .dimensions
                    .into_iter()
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("row {} has no page path dimension", index))?;
                let views = row
                    .metrics
                    .into_iter()
                    .next()
                    .and_then(|m| m.values.into_iter().next())
                    .ok_or_else(|| anyhow::anyhow!("row {} has no page view value", index))?;
                Ok(ReportRow { page_path, views })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_pages_request_wire_format() {
        let body = GetReportsRequest::from(ReportRequest::top_pages("123456"));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "reportRequests": [{
                    "viewId": "123456",
                    "dateRanges": [{"startDate": "7daysAgo", "endDate": "today"}],
                    "metrics": [{"expression": "ga:pageviews"}],
                    "dimensions": [{"name": "ga:pagePath"}],
                    "orderBys": [{"fieldName": "ga:pageviews", "sortOrder": "DESCENDING"}],
                    "pageSize": 5
                }]
            })
        );
    }

    #[test]
    fn test_response_rows_keep_service_order() {
        let response: GetReportsResponse = serde_json::from_value(json!({
            "reports": [{
                "columnHeader": {"dimensions": ["ga:pagePath"]},
                "data": {
                    "rows": [
                        {"dimensions": ["/pathA"], "metrics": [{"values": ["120"]}]},
                        {"dimensions": ["/pathB"], "metrics": [{"values": ["75"]}]}
                    ],
                    "totals": [{"values": ["195"]}]
                }
            }]
        }))
        .unwrap();

        assert_eq!(
            response.into_rows().unwrap(),
            vec![ReportRow::new("/pathA", "120"), ReportRow::new("/pathB", "75")]
        );
    }

    #[test]
    fn test_response_without_rows_is_empty() {
        let response: GetReportsResponse = serde_json::from_value(json!({
            "reports": [{"data": {"totals": [{"values": ["0"]}]}}]
        }))
        .unwrap();

        assert!(response.into_rows().unwrap().is_empty());
    }

    #[test]
    fn test_response_without_reports_is_an_error() {
        let response: GetReportsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_rows().is_err());
    }

    #[test]
    fn test_row_missing_metric_is_an_error() {
        let response: GetReportsResponse = serde_json::from_value(json!({
            "reports": [{"data": {"rows": [{"dimensions": ["/a"], "metrics": []}]}}]
        }))
        .unwrap();

        let err = response.into_rows().unwrap_err();
        assert!(err.to_string().contains("no page view value"));
    }
}
