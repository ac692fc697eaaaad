//! Domain model for the status board.
//!
//! Task records from the service-request API and from the manual task store
//! are unified into one [`TaskRecord`] with a tagged [`TaskOrigin`]. The
//! [`Board`] partitions them into the four [`BoardStatus`] columns. Nothing in
//! this module performs I/O.

mod board;
mod document;
mod error;
mod form;
mod ids;
mod record;
mod status;
mod urgency;

pub use board::Board;
pub use document::{TaskDocument, timestamp};
pub use error::{BoardDomainError, ParseBoardStatusError};
pub use form::{RequiredField, TaskDetails, TaskForm, placeholder_email};
pub use ids::{
    CaseId, CaseNamespace, MANUAL_CASE_PREFIX, MANUAL_TASK_ID_PREFIX, SERVICE_CASE_PREFIX,
    TaskId,
};
pub use record::{TaskOrigin, TaskRecord};
pub use status::{BoardStatus, HorizontalDirection, VerticalDirection};
pub use urgency::Urgency;
