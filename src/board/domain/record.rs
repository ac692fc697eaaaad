//! Task record aggregate and its origin.

use super::{
    BoardDomainError, BoardStatus, CaseId, TaskDetails, TaskDocument, TaskId, Urgency,
    placeholder_email,
};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source a task record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskOrigin {
    /// Service request owned by the remote API.
    Server {
        /// Whether an operator approved the request for the board.
        approved_for_board: bool,
    },
    /// Task created on the board and kept in the manual task store.
    Manual,
}

impl TaskOrigin {
    /// Returns `true` for manually created tasks.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        matches!(self, Self::Manual)
    }

    /// Returns `true` when the record may be shown on the board.
    ///
    /// Manual tasks are approved on creation.
    #[must_use]
    pub const fn is_approved_for_board(self) -> bool {
        match self {
            Self::Server { approved_for_board } => approved_for_board,
            Self::Manual => true,
        }
    }
}

/// A case as shown on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    id: TaskId,
    case_id: Option<CaseId>,
    origin: TaskOrigin,
    status: BoardStatus,
    details: TaskDetails,
    created_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    estimated_completion: Option<DateTime<Utc>>,
    archived: bool,
    extra: Map<String, Value>,
}

impl TaskRecord {
    /// Creates a manual task from validated details.
    ///
    /// The task gets a fresh manual-namespace id, a `KB` case reference
    /// derived from the creation time, `pending` status and a placeholder
    /// email when none was entered. The creation time is kept at millisecond
    /// precision, the precision of the stored document.
    #[must_use]
    pub fn new_manual(mut details: TaskDetails, clock: &impl Clock) -> Self {
        let created_at = clock.utc().trunc_subsecs(3);
        if details.email.trim().is_empty() {
            details.email = placeholder_email(&details.name);
        }
        Self {
            id: TaskId::generate_manual(),
            case_id: Some(CaseId::for_manual_task(created_at)),
            origin: TaskOrigin::Manual,
            status: BoardStatus::Pending,
            details,
            created_at: Some(created_at),
            started_at: None,
            completed_at: None,
            estimated_completion: None,
            archived: false,
            extra: Map::new(),
        }
    }

    /// Reads a record returned by the service-request API.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] when the document has no id.
    pub fn from_service_request(document: TaskDocument) -> Result<Self, BoardDomainError> {
        let origin = TaskOrigin::Server {
            approved_for_board: document.approved_for_kanban,
        };
        Self::from_document(document, origin)
    }

    /// Reads a record from the manual task store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] when the document has no id.
    pub fn from_manual_entry(document: TaskDocument) -> Result<Self, BoardDomainError> {
        Self::from_document(document, TaskOrigin::Manual)
    }

    fn from_document(
        document: TaskDocument,
        origin: TaskOrigin,
    ) -> Result<Self, BoardDomainError> {
        let id = TaskId::new(document.id.as_str())?;
        let case_id = document
            .case_id
            .as_deref()
            .and_then(|raw| CaseId::new(raw).ok());
        let details = details_from_document(&document);
        Ok(Self {
            id,
            case_id,
            origin,
            status: BoardStatus::from_wire(document.status.as_deref()),
            details,
            created_at: document.created_at,
            started_at: document.started_at,
            completed_at: document.completed_at,
            estimated_completion: document.estimated_completion,
            archived: document.is_archived,
            extra: document.extra,
        })
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the case reference, if the source provided one.
    #[must_use]
    pub const fn case_id(&self) -> Option<&CaseId> {
        self.case_id.as_ref()
    }

    /// Returns the record origin.
    #[must_use]
    pub const fn origin(&self) -> TaskOrigin {
        self.origin
    }

    /// Returns the status bucket.
    #[must_use]
    pub const fn status(&self) -> BoardStatus {
        self.status
    }

    /// Returns the content fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.details.urgency
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the time work started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the time work completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the completion estimate issued by the backend.
    #[must_use]
    pub const fn estimated_completion(&self) -> Option<DateTime<Utc>> {
        self.estimated_completion
    }

    /// Returns `true` when the backend archived the record.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns `true` when the record belongs on the board.
    #[must_use]
    pub const fn is_on_board(&self) -> bool {
        self.origin.is_approved_for_board()
    }

    /// Moves the record into `status`.
    ///
    /// Entering `in_progress` stamps `started_at` and entering `completed`
    /// stamps `completed_at`, unless already set.
    pub fn set_status(&mut self, status: BoardStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            BoardStatus::InProgress => {
                self.started_at.get_or_insert(at);
            }
            BoardStatus::Completed => {
                self.completed_at.get_or_insert(at);
            }
            BoardStatus::Pending | BoardStatus::PickedUp => {}
        }
    }

    /// Replaces the case reference.
    pub fn set_case_id(&mut self, case_id: CaseId) {
        self.case_id = Some(case_id);
    }

    /// Replaces the content fields, leaving status and timestamps alone.
    pub fn set_details(&mut self, details: TaskDetails) {
        self.details = details;
    }

    /// Marks a server record as approved and resets it to `pending`.
    ///
    /// Manual records are already approved and only have their status reset.
    pub fn approve_for_board(&mut self) {
        if let TaskOrigin::Server { .. } = self.origin {
            self.origin = TaskOrigin::Server {
                approved_for_board: true,
            };
        }
        self.status = BoardStatus::Pending;
    }

    /// Applies the fields of a record echoed back by the server.
    ///
    /// The identifier and origin kind are kept; everything the document
    /// carries replaces the local copy.
    pub fn merge_document(&mut self, document: TaskDocument) {
        if let Some(case_id) = document
            .case_id
            .as_deref()
            .and_then(|raw| CaseId::new(raw).ok())
        {
            self.case_id = Some(case_id);
        }
        if let TaskOrigin::Server { .. } = self.origin {
            self.origin = TaskOrigin::Server {
                approved_for_board: document.approved_for_kanban,
            };
        }
        if document.status.is_some() {
            self.status = BoardStatus::from_wire(document.status.as_deref());
        }
        self.details = details_from_document(&document);
        self.created_at = document.created_at.or(self.created_at);
        self.started_at = document.started_at.or(self.started_at);
        self.completed_at = document.completed_at.or(self.completed_at);
        self.estimated_completion = document.estimated_completion.or(self.estimated_completion);
        self.archived = document.is_archived;
        self.extra = document.extra;
    }

    /// Serialises the record into its wire document.
    ///
    /// Keys the record does not model are written back unchanged.
    #[must_use]
    pub fn to_document(&self) -> TaskDocument {
        TaskDocument {
            id: self.id.as_str().to_owned(),
            case_id: self.case_id.as_ref().map(|case_id| case_id.as_str().to_owned()),
            status: Some(self.status.as_str().to_owned()),
            name: Some(self.details.name.clone()),
            phone: Some(self.details.phone.clone()),
            email: Some(self.details.email.clone()),
            device_type: Some(self.details.device_type.clone()),
            problem_description: Some(self.details.problem_description.clone()),
            urgency: Some(self.details.urgency.as_str().to_owned()),
            price: self.details.price,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
            estimated_completion: self.estimated_completion,
            approved_for_kanban: self.origin.is_approved_for_board(),
            is_manual: self.origin.is_manual(),
            is_archived: self.archived,
            extra: self.extra.clone(),
        }
    }
}

fn details_from_document(document: &TaskDocument) -> TaskDetails {
    TaskDetails {
        name: document.name.clone().unwrap_or_default(),
        phone: document.phone.clone().unwrap_or_default(),
        email: document.email.clone().unwrap_or_default(),
        device_type: document.device_type.clone().unwrap_or_default(),
        problem_description: document.problem_description.clone().unwrap_or_default(),
        urgency: Urgency::from_wire(document.urgency.as_deref()),
        price: document.price,
    }
}
