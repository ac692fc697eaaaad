//! Flat JSON document exchanged with the service-request API and the manual
//! task store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use chrono::{DateTime, Utc};

/// Wire shape of a task record.
///
/// Both sources use the same snake_case object. Keys this type does not model
/// are kept in [`TaskDocument::extra`] so they survive a read-modify-write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Record identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable case reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    /// Raw status value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Customer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Customer phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Customer email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Device category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// Free-text problem description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
    /// Raw urgency value, including legacy spellings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    /// Price estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Creation time.
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Time work started.
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Time work completed.
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion estimate issued by the backend.
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<DateTime<Utc>>,
    /// Whether an operator approved the record for the board.
    #[serde(default)]
    pub approved_for_kanban: bool,
    /// Whether the record was created manually on the board.
    #[serde(default)]
    pub is_manual: bool,
    /// Whether the backend archived the record.
    #[serde(default)]
    pub is_archived: bool,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lenient (de)serialisation of optional timestamps.
///
/// Accepts RFC 3339, naive ISO-8601 date-times (read as UTC) and plain
/// `YYYY-MM-DD` dates. Always writes RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parses a timestamp in any of the accepted formats.
    #[must_use]
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        let trimmed = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Serialises an optional timestamp as RFC 3339.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[expect(
        clippy::ref_option,
        reason = "serde `with` modules receive a reference to the field"
    )]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => {
                serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserialises an optional timestamp, mapping unparseable values to
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is neither a string nor null.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
