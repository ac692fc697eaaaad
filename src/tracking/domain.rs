//! Tracking report model.

use crate::board::{
    domain::{BoardStatus, CaseId, CaseNamespace, TaskDocument, Urgency, timestamp},
    ports::CaseTrackingRecord,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::fmt;

const ARCHIVED: &str = "archived";

/// Lifecycle position of a tracked case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    /// The case is on the board in the given column.
    Board(BoardStatus),
    /// The case has been archived by the backend.
    Archived,
}

impl CaseStatus {
    /// Reads a raw status value; `archived` or the archive flag win over the
    /// board status.
    #[must_use]
    pub fn from_wire(value: Option<&str>, is_archived: bool) -> Self {
        let archived_value = value.is_some_and(|raw| raw.trim().eq_ignore_ascii_case(ARCHIVED));
        if is_archived || archived_value {
            Self::Archived
        } else {
            Self::Board(BoardStatus::from_wire(value))
        }
    }

    /// Returns the progress percentage shown to the customer.
    #[must_use]
    pub const fn progress_percent(self) -> u8 {
        match self {
            Self::Board(BoardStatus::Pending) => 1,
            Self::Board(BoardStatus::InProgress) => 50,
            Self::Board(BoardStatus::Completed | BoardStatus::PickedUp) | Self::Archived => 100,
        }
    }

    /// Returns the wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board(status) => status.as_str(),
            Self::Archived => ARCHIVED,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a customer sees when tracking a case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    /// Case reference that was looked up.
    pub case_id: CaseId,
    /// Which source answered.
    pub source: CaseNamespace,
    /// Lifecycle position.
    pub status: CaseStatus,
    /// Progress percentage, 1 to 100.
    pub progress: u8,
    /// Device category.
    pub device_type: Option<String>,
    /// Urgency.
    pub urgency: Urgency,
    /// Price estimate.
    pub price: Option<f64>,
    /// Day the case was opened.
    pub created_on: Option<NaiveDate>,
    /// Day work started.
    pub started_on: Option<NaiveDate>,
    /// Day work completed.
    pub completed_on: Option<NaiveDate>,
    /// Expected completion day.
    pub estimated_completion: Option<NaiveDate>,
}

impl CaseReport {
    /// Builds a report from a stored or archived task document.
    #[must_use]
    pub fn from_document(case_id: CaseId, source: CaseNamespace, document: &TaskDocument) -> Self {
        let status = CaseStatus::from_wire(document.status.as_deref(), document.is_archived);
        let urgency = Urgency::from_wire(document.urgency.as_deref());
        let created_on = day(document.created_at);
        Self {
            case_id,
            source,
            status,
            progress: status.progress_percent(),
            device_type: document.device_type.clone(),
            urgency,
            price: document.price,
            created_on,
            started_on: day(document.started_at),
            completed_on: day(document.completed_at),
            estimated_completion: day(document.estimated_completion)
                .or_else(|| estimate_completion(created_on, urgency)),
        }
    }

    /// Builds a report from the service-request tracking view.
    ///
    /// The server's own progress figure is used when it sends one.
    #[must_use]
    pub fn from_tracking(case_id: CaseId, record: &CaseTrackingRecord) -> Self {
        let status = CaseStatus::from_wire(record.status.as_deref(), record.is_archived);
        let urgency = Urgency::from_wire(record.urgency.as_deref());
        let created_on = parse_day(record.created_at.as_deref());
        Self {
            case_id,
            source: CaseNamespace::ServiceRequest,
            status,
            progress: record
                .progress
                .map_or_else(|| status.progress_percent(), |progress| progress.min(100)),
            device_type: record.device_type.clone(),
            urgency,
            price: record.price,
            created_on,
            started_on: parse_day(record.started_at.as_deref()),
            completed_on: parse_day(record.completed_at.as_deref()),
            estimated_completion: parse_day(record.estimated_completion.as_deref())
                .or_else(|| estimate_completion(created_on, urgency)),
        }
    }
}

/// Estimates completion as the creation day plus the urgency's turnaround.
#[must_use]
pub fn estimate_completion(created_on: Option<NaiveDate>, urgency: Urgency) -> Option<NaiveDate> {
    created_on?.checked_add_days(Days::new(u64::from(urgency.turnaround_days())))
}

fn day(value: Option<DateTime<Utc>>) -> Option<NaiveDate> {
    value.map(|timestamp| timestamp.date_naive())
}

fn parse_day(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(timestamp::parse).map(|parsed| parsed.date_naive())
}
