//! HTTP request/response payloads
//!
//! Wire form is camelCase, matching the web client.

use serde::{Deserialize, Serialize};

use super::types::{Analysis, Coordinates, ReportStatus, ReportType};

/// POST /api/reports body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub location: String,
    pub coordinates: Option<Coordinates>,
    /// Opaque references into the external evidence store
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// POST /api/reports response — the tracking handle is the only thing a
/// reporter ever needs to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponse {
    pub public_id: String,
}

/// PATCH /api/reports/{internalId} body
///
/// `expected_version` must match the record's current version or the
/// request fails with a conflict and applies nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub expected_version: u64,
    pub status: Option<ReportStatus>,
    pub analysis: Option<Analysis>,
}

/// GET /api/reports query string
///
/// Clients send `?status=&type=` for "no filter"; empty values read as
/// absent rather than failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListReportsQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<ReportStatus>,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    pub report_type: Option<ReportType>,
}

/// Deserialize an optional enum, treating `""` as absent
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    use serde::Deserialize;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_values_read_as_absent() {
        let query: ListReportsQuery =
            serde_json::from_str(r#"{"status":"","type":""}"#).expect("parse query");
        assert!(query.status.is_none());
        assert!(query.report_type.is_none());

        let query: ListReportsQuery =
            serde_json::from_str(r#"{"status":"PENDING","type":"THEFT"}"#).expect("parse query");
        assert_eq!(query.status, Some(ReportStatus::Pending));
        assert_eq!(query.report_type, Some(ReportType::Theft));
    }
}
