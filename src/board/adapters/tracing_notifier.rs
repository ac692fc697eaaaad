//! Notifier that reports notices as tracing events.

use crate::board::ports::{Notice, NoticeSeverity, OperatorNotifier};

/// Emits every notice as a `tracing` event at the matching level.
///
/// Suitable for headless deployments where the operator reads the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl OperatorNotifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let task_id = notice.task_id.as_ref().map(ToString::to_string);
        match notice.severity {
            NoticeSeverity::Info => {
                tracing::info!(task_id = ?task_id, "{}", notice.message);
            }
            NoticeSeverity::Warning => {
                tracing::warn!(task_id = ?task_id, "{}", notice.message);
            }
            NoticeSeverity::Error => {
                tracing::error!(task_id = ?task_id, "{}", notice.message);
            }
        }
    }
}
