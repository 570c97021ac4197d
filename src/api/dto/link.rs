//! DTOs for the link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::utils::link_validator::validate_link_input;

const NOT_A_STRING: &str = "Must be a string";

/// Request body for `POST /api/links`.
///
/// Fields are kept as raw JSON so that a missing or wrongly typed value is
/// reported as a field-level validation error rather than a parse failure.
/// `null` is treated as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Absolute URL to redirect to.
    pub target_url: Option<Value>,

    /// Optional custom code (6-8 letters or digits). Generated when absent.
    pub code: Option<Value>,
}

impl CreateLinkRequest {
    /// Extracts the string fields as `(target_url, code)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any field is not a string. The
    /// remaining fields are still validated and their violations are listed
    /// in the same `details.fields` object.
    pub fn into_fields(self) -> Result<(Option<String>, Option<String>), AppError> {
        let mut fields = Map::new();
        let target_url = string_field(self.target_url, "targetUrl", &mut fields);
        let code = string_field(self.code, "code", &mut fields);

        if fields.is_empty() {
            return Ok((target_url, code));
        }

        if let Err(AppError::Validation { details, .. }) = validate_link_input(target_url, code)
            && let Some(rule_fields) = details.get("fields").and_then(Value::as_object)
        {
            for (name, messages) in rule_fields {
                fields
                    .entry(name.clone())
                    .or_insert_with(|| messages.clone());
            }
        }

        Err(AppError::bad_request(
            "Validation failed",
            json!({ "fields": fields }),
        ))
    }
}

fn string_field(value: Option<Value>, name: &str, fields: &mut Map<String, Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            fields.insert(name.to_string(), json!([NOT_A_STRING]));
            None
        }
    }
}

/// Query parameters for `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Case-insensitive substring matched against code and target URL.
    pub q: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
            deleted_at: link.deleted_at,
        }
    }
}

/// Response body for a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLinkResponse {
    pub ok: bool,
}
