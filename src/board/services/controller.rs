//! Board controller: owns the column state and mediates every transition.

use crate::board::{
    domain::{
        Board, BoardDomainError, BoardStatus, CaseId, HorizontalDirection, TaskDocument, TaskForm,
        TaskId, TaskOrigin, TaskRecord, VerticalDirection,
    },
    ports::{
        GatewayError, ManualStoreError, ManualTaskStore, Notice, OperatorNotifier,
        ServiceRequestGateway, ServiceRequestPatch,
    },
};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// How the board treats a status move of a server-owned record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServerMovePolicy {
    /// Move on the board first, then ask the server. A failed server update
    /// leaves the move in place and notifies the operator.
    #[default]
    Optimistic,
    /// Ask the server first and move on the board only after it succeeds.
    Pessimistic,
}

impl ServerMovePolicy {
    /// Returns the configuration spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Pessimistic => "pessimistic",
        }
    }
}

impl TryFrom<&str> for ServerMovePolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Self::Optimistic),
            "pessimistic" => Ok(Self::Pessimistic),
            _ => Err(value.to_owned()),
        }
    }
}

impl fmt::Display for ServerMovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// Nothing changed: same column, board edge, or unknown task.
    Unchanged,
    /// The task moved and the move was persisted.
    Moved,
    /// The task moved on the board but the server update failed.
    MovedUnsynced,
    /// The move was refused because it could not be persisted.
    Rejected,
}

impl MoveOutcome {
    /// Returns `true` when the board now shows the task in the new column.
    #[must_use]
    pub const fn is_moved(self) -> bool {
        matches!(self, Self::Moved | Self::MovedUnsynced)
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The service-request API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The manual task store failed.
    #[error(transparent)]
    Store(#[from] ManualStoreError),
}

/// Result type for board controller operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Owns the in-memory board and keeps both task sources in step with it.
///
/// Every gateway and store failure is reported through the
/// [`OperatorNotifier`]; none escapes as a panic.
pub struct BoardController<G, S, C>
where
    G: ServiceRequestGateway,
    S: ManualTaskStore,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    store: Arc<S>,
    notifier: Arc<dyn OperatorNotifier>,
    clock: Arc<C>,
    move_policy: ServerMovePolicy,
    server_records: Vec<TaskRecord>,
    manual_records: Vec<TaskRecord>,
    board: Board,
}

impl<G, S, C> BoardController<G, S, C>
where
    G: ServiceRequestGateway,
    S: ManualTaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty board.
    #[must_use]
    pub fn new(
        gateway: Arc<G>,
        store: Arc<S>,
        notifier: Arc<dyn OperatorNotifier>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
            clock,
            move_policy: ServerMovePolicy::default(),
            server_records: Vec::new(),
            manual_records: Vec::new(),
            board: Board::new(),
        }
    }

    /// Sets the policy for moving server-owned records.
    #[must_use]
    pub const fn with_move_policy(mut self, policy: ServerMovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Returns the active server move policy.
    #[must_use]
    pub const fn move_policy(&self) -> ServerMovePolicy {
        self.move_policy
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns one column of the current board.
    #[must_use]
    pub fn column(&self, status: BoardStatus) -> &[TaskRecord] {
        self.board.column(status)
    }

    /// Reads the manual task store and derives the board from it and
    /// `server_documents`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the manual tasks cannot be read. The
    /// board is still derived, from the server records alone.
    pub fn mount(&mut self, server_documents: Vec<TaskDocument>) -> BoardResult<()> {
        let loaded = self.store.load();
        let outcome = match loaded {
            Ok(documents) => {
                self.manual_records = read_manual(documents);
                Ok(())
            }
            Err(err) => {
                self.report(Notice::error(None, format!("could not read manual tasks: {err}")));
                self.manual_records.clear();
                Err(err.into())
            }
        };
        self.refresh(server_documents);
        outcome
    }

    /// Re-derives the board from a new server list.
    ///
    /// The manual task store is not re-read; manual tasks come from the
    /// controller's own copy. Within-column reordering is lost.
    pub fn refresh(&mut self, server_documents: Vec<TaskDocument>) {
        self.server_records = server_documents
            .into_iter()
            .filter_map(|document| match TaskRecord::from_service_request(document) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable service request");
                    None
                }
            })
            .collect();
        self.rederive();
    }

    /// Fetches the service-request list through the gateway and refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the list cannot be fetched; the
    /// board is left as it was.
    pub async fn load_from_gateway(&mut self) -> BoardResult<()> {
        match self.gateway.list().await {
            Ok(documents) => {
                self.refresh(documents);
                Ok(())
            }
            Err(err) => {
                self.report(Notice::error(
                    None,
                    format!("could not load service requests: {err}"),
                ));
                Err(err.into())
            }
        }
    }

    fn rederive(&mut self) {
        self.board = Board::derive(&self.server_records, &self.manual_records);
        tracing::debug!(
            server = self.server_records.len(),
            manual = self.manual_records.len(),
            visible = self.board.len(),
            "board derived"
        );
    }

    /// Moves a task from column `from` to the end of column `to`.
    ///
    /// Manual tasks are saved to the store before the board changes. Server
    /// records follow the configured [`ServerMovePolicy`]. Moving within the
    /// same column, or a task that is not in `from`, changes nothing.
    pub async fn move_task(&mut self, id: &TaskId, from: BoardStatus, to: BoardStatus) -> MoveOutcome {
        if from == to {
            return MoveOutcome::Unchanged;
        }
        let Some(record) = self.board.find_in(from, id).cloned() else {
            tracing::debug!(task_id = %id, %from, "move ignored: task not in source column");
            return MoveOutcome::Unchanged;
        };
        let outcome = match record.origin() {
            TaskOrigin::Manual => self.move_manual(record, from, to),
            TaskOrigin::Server { .. } => self.move_server(id, from, to).await,
        };
        tracing::info!(task_id = %id, %from, %to, ?outcome, "move handled");
        outcome
    }

    /// Moves a task one column left or right.
    ///
    /// Moving left from `pending` or right from `picked_up` changes nothing.
    pub async fn move_adjacent(
        &mut self,
        id: &TaskId,
        current: BoardStatus,
        direction: HorizontalDirection,
    ) -> MoveOutcome {
        let Some(target) = current.adjacent(direction) else {
            return MoveOutcome::Unchanged;
        };
        self.move_task(id, current, target).await
    }

    /// Swaps a task with its neighbour in the same column.
    ///
    /// The new order lives only in memory until the next refresh. Returns
    /// `false` at the column edge or for an unknown task.
    pub fn move_within_column(
        &mut self,
        id: &TaskId,
        status: BoardStatus,
        direction: VerticalDirection,
    ) -> bool {
        self.board.reorder(id, status, direction)
    }

    fn move_manual(&mut self, mut record: TaskRecord, from: BoardStatus, to: BoardStatus) -> MoveOutcome {
        let now = self.now();
        record.set_status(to, now);
        if let Err(err) = self.persist_manual(&record) {
            self.report(Notice::error(
                Some(record.id().clone()),
                format!("could not save move to {to}: {err}"),
            ));
            return MoveOutcome::Rejected;
        }
        self.board.transfer(record.id(), from, to, now);
        MoveOutcome::Moved
    }

    async fn move_server(&mut self, id: &TaskId, from: BoardStatus, to: BoardStatus) -> MoveOutcome {
        let patch = ServiceRequestPatch::status(to);
        match self.move_policy {
            ServerMovePolicy::Optimistic => {
                let now = self.now();
                self.board.transfer(id, from, to, now);
                match self.gateway.update(id, &patch).await {
                    Ok(echo) => {
                        self.apply_echo(id, echo);
                        MoveOutcome::Moved
                    }
                    Err(err) => {
                        self.report(Notice::warning(
                            Some(id.clone()),
                            format!("moved to {to} on the board, but the server update failed: {err}"),
                        ));
                        MoveOutcome::MovedUnsynced
                    }
                }
            }
            ServerMovePolicy::Pessimistic => match self.gateway.update(id, &patch).await {
                Ok(echo) => {
                    let now = self.now();
                    self.board.transfer(id, from, to, now);
                    self.apply_echo(id, echo);
                    MoveOutcome::Moved
                }
                Err(err) => {
                    self.report(Notice::error(
                        Some(id.clone()),
                        format!("could not move to {to}: {err}"),
                    ));
                    MoveOutcome::Rejected
                }
            },
        }
    }

    /// Creates a manual task from `form` and adds it to `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] naming the missing fields when the form
    /// is incomplete, or [`BoardError::Store`] when the task cannot be saved.
    /// Neither case changes the board.
    pub fn create_manual_task(&mut self, form: TaskForm) -> BoardResult<TaskRecord> {
        let details = match form.into_details() {
            Ok(details) => details,
            Err(err) => {
                self.report(Notice::warning(None, err.to_string()));
                return Err(err.into());
            }
        };
        let mut record = TaskRecord::new_manual(details, &*self.clock);
        self.assign_unused_case_id(&mut record);
        match self.store.append(&record.to_document()) {
            Ok(stored) => self.manual_records = read_manual(stored),
            Err(err) => {
                self.report(Notice::error(None, format!("could not save the new task: {err}")));
                return Err(err.into());
            }
        }
        self.board.insert(record.clone());
        tracing::info!(
            task_id = %record.id(),
            case_id = ?record.case_id().map(ToString::to_string),
            "manual task created"
        );
        Ok(record)
    }

    /// Replaces the content fields of a task, leaving its status alone.
    ///
    /// A blank email keeps the current one. Manual tasks are saved to the
    /// store; server records are patched through the gateway and updated on
    /// the board only after it succeeds. Returns `Ok(None)` for a task that
    /// is not on the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] for an incomplete form,
    /// [`BoardError::Store`] or [`BoardError::Gateway`] when the change
    /// cannot be persisted. The board is unchanged in every error case.
    pub async fn edit_task(&mut self, id: &TaskId, form: TaskForm) -> BoardResult<Option<TaskRecord>> {
        let Some(existing) = self.board.find(id).cloned() else {
            tracing::debug!(task_id = %id, "edit ignored: task not on board");
            return Ok(None);
        };
        let mut details = match form.into_details() {
            Ok(details) => details,
            Err(err) => {
                self.report(Notice::warning(Some(id.clone()), err.to_string()));
                return Err(err.into());
            }
        };
        if details.email.trim().is_empty() {
            details.email.clone_from(&existing.details().email);
        }
        let mut updated = existing.clone();
        updated.set_details(details);

        match existing.origin() {
            TaskOrigin::Manual => {
                if let Err(err) = self.persist_manual(&updated) {
                    self.report(Notice::error(
                        Some(id.clone()),
                        format!("could not save task changes: {err}"),
                    ));
                    return Err(err);
                }
            }
            TaskOrigin::Server { .. } => {
                let patch = ServiceRequestPatch::content(updated.details());
                match self.gateway.update(id, &patch).await {
                    Ok(Some(echo)) => {
                        updated = existing;
                        updated.merge_document(echo);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        self.report(Notice::error(
                            Some(id.clone()),
                            format!("could not update the service request: {err}"),
                        ));
                        return Err(err.into());
                    }
                }
            }
        }
        self.board.update(updated.clone());
        tracing::info!(task_id = %id, "task edited");
        Ok(Some(updated))
    }

    /// Approves a known service request for the board and places it in
    /// `pending` once the server confirms.
    ///
    /// Returns `Ok(None)` when the id is not among the current server
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the server refuses; the board is
    /// unchanged.
    pub async fn approve_for_board(&mut self, id: &TaskId) -> BoardResult<Option<TaskRecord>> {
        let Some(mut record) = self
            .server_records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
        else {
            tracing::debug!(task_id = %id, "approval ignored: unknown service request");
            return Ok(None);
        };
        let echo = match self.gateway.update(id, &ServiceRequestPatch::approval()).await {
            Ok(echo) => echo,
            Err(err) => {
                self.report(Notice::error(
                    Some(id.clone()),
                    format!("could not approve the service request: {err}"),
                ));
                return Err(err.into());
            }
        };
        record.approve_for_board();
        if let Some(document) = echo {
            record.merge_document(document);
        }
        if let Some(slot) = self.server_records.iter_mut().find(|stored| stored.id() == id) {
            *slot = record.clone();
        }
        if !self.board.update(record.clone()) {
            self.board.insert(record.clone());
        }
        self.report(Notice::info(
            Some(id.clone()),
            "service request approved for the board",
        ));
        Ok(Some(record))
    }

    /// Suffixes the case reference of a new manual task while another manual
    /// task already holds it.
    fn assign_unused_case_id(&self, record: &mut TaskRecord) {
        let Some(base) = record.case_id().cloned() else {
            return;
        };
        let taken = |candidate: &CaseId| {
            self.manual_records
                .iter()
                .any(|stored| stored.case_id() == Some(candidate))
        };
        if !taken(&base) {
            return;
        }
        if let Some(unused) = (2..=u32::MAX)
            .map(|sequence| base.with_sequence(sequence))
            .find(|candidate| !taken(candidate))
        {
            tracing::debug!(case_id = %base, assigned = %unused, "manual case reference already taken");
            record.set_case_id(unused);
        }
    }

    /// Writes a manual task back to the store and refreshes the controller's
    /// copy of the manual list from what was written.
    fn persist_manual(&mut self, record: &TaskRecord) -> BoardResult<()> {
        match self.store.replace(&record.to_document())? {
            Some(stored) => self.manual_records = read_manual(stored),
            None => {
                tracing::warn!(task_id = %record.id(), "manual task missing from store, board copy only");
                if let Some(slot) = self
                    .manual_records
                    .iter_mut()
                    .find(|stored| stored.id() == record.id())
                {
                    *slot = record.clone();
                }
            }
        }
        Ok(())
    }

    fn apply_echo(&mut self, id: &TaskId, echo: Option<TaskDocument>) {
        let Some(document) = echo else {
            return;
        };
        if let Some(mut record) = self.board.find(id).cloned() {
            record.merge_document(document);
            self.board.update(record);
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(3)
    }

    fn report(&self, notice: Notice) {
        tracing::debug!(severity = ?notice.severity, "operator notified");
        self.notifier.notify(notice);
    }
}

fn read_manual(documents: Vec<TaskDocument>) -> Vec<TaskRecord> {
    documents
        .into_iter()
        .filter_map(|document| match TaskRecord::from_manual_entry(document) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable manual task");
                None
            }
        })
        .collect()
}
