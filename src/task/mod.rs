//! Background fit execution with polled status.
//!
//! A submitted request becomes a unit of work on its own worker thread.
//! Workers never touch the status store: each one sends its outcome over a
//! channel to a single collector thread, and only the collector performs
//! the read-modify-write of a record under the store lock. Units of work
//! get a generated id, never share ids, and cannot be cancelled once
//! dispatched; callers poll until the status is terminal.
//!
//! Dropping the queue closes the channel and joins the collector, which
//! drains every outstanding worker message first, so no completed fit is
//! ever lost to shutdown.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ExperimentKind, ExperimentOutput, ExperimentRequest};
use crate::error::FitError;
use crate::fit::fit_request;

/// How often [`TaskQueue::wait`] re-reads the store.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Lifecycle of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Whether polling can stop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

/// Status-store entry for one unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub experiment: ExperimentKind,
    pub status: TaskStatus,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Present once the task completed.
    pub output: Option<ExperimentOutput>,
    /// Human-readable progress note.
    pub message: Option<String>,
    /// Error text for failed tasks.
    pub error: Option<String>,
}

/// Worker-to-collector message carrying one task's outcome.
struct TaskUpdate {
    id: String,
    finished_at: DateTime<Utc>,
    outcome: Result<ExperimentOutput, FitError>,
}

/// Fire-and-forget fit executor with a polled status store.
pub struct TaskQueue {
    store: Arc<Mutex<HashMap<String, TaskRecord>>>,
    updates: Sender<TaskUpdate>,
    collector: Option<JoinHandle<()>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        let store = Arc::new(Mutex::new(HashMap::<String, TaskRecord>::new()));
        let (updates, inbox) = mpsc::channel::<TaskUpdate>();

        let collector_store = Arc::clone(&store);
        let collector = thread::spawn(move || {
            for update in inbox {
                // A poisoned lock still holds the last written map.
                let mut records = collector_store
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(record) = records.get_mut(&update.id) {
                    record.finished_at = Some(update.finished_at);
                    match update.outcome {
                        Ok(output) => {
                            record.status = TaskStatus::Completed;
                            record.message =
                                Some(format!("produced {} figure(s)", output.figures.len()));
                            record.output = Some(output);
                        }
                        Err(err) => {
                            record.status = TaskStatus::Failed;
                            record.message = Some("fit failed".to_string());
                            record.error = Some(err.to_string());
                        }
                    }
                }
            }
        });

        Self {
            store,
            updates,
            collector: Some(collector),
        }
    }

    /// Submit a request for background fitting; returns the generated task
    /// id immediately.
    pub fn submit(&self, request: ExperimentRequest) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let record = TaskRecord {
            id: id.clone(),
            experiment: request.kind(),
            status: TaskStatus::Pending,
            submitted_at: Utc::now(),
            finished_at: None,
            output: None,
            message: None,
            error: None,
        };
        self.lock_store().insert(id.clone(), record);

        let updates = self.updates.clone();
        let worker_id = id.clone();
        thread::spawn(move || {
            let outcome = fit_request(&request);
            // A send failure means the queue is shutting down and the
            // result has nowhere to go.
            let _ = updates.send(TaskUpdate {
                id: worker_id,
                finished_at: Utc::now(),
                outcome,
            });
        });
        id
    }

    /// Snapshot of one record.
    pub fn status(&self, id: &str) -> Option<TaskRecord> {
        self.lock_store().get(id).cloned()
    }

    /// Snapshot of every record, oldest submission first.
    pub fn snapshot(&self) -> Vec<TaskRecord> {
        let mut records: Vec<TaskRecord> = self.lock_store().values().cloned().collect();
        records.sort_by_key(|record| record.submitted_at);
        records
    }

    /// Block until the record reaches a terminal status.
    ///
    /// Returns `None` for an unknown id.
    pub fn wait(&self, id: &str) -> Option<TaskRecord> {
        loop {
            let record = self.status(id)?;
            if record.status.is_terminal() {
                return Some(record);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, HashMap<String, TaskRecord>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        // Replace the sender so the channel closes once the last worker
        // finishes, then wait for the collector to drain it.
        let (disconnected, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.updates, disconnected));
        if let Some(handle) = self.collector.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MillikanRequest;

    fn good_request() -> ExperimentRequest {
        ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0, 2.0, 3.0],
            charges: vec![1.6, 3.2, 4.8],
        })
    }

    fn bad_request() -> ExperimentRequest {
        ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0, 2.0],
            charges: vec![1.6],
        })
    }

    #[test]
    fn submitted_task_completes_with_output() {
        let queue = TaskQueue::new();
        let id = queue.submit(good_request());
        let record = queue.wait(&id).unwrap();
        assert_eq!(record.status, TaskStatus::Completed);
        assert!(record.finished_at.is_some());
        assert_eq!(record.output.as_ref().unwrap().figures.len(), 1);
        assert_eq!(record.message.as_deref(), Some("produced 1 figure(s)"));
        assert!(record.error.is_none());
    }

    #[test]
    fn failed_task_records_the_error_text() {
        let queue = TaskQueue::new();
        let id = queue.submit(bad_request());
        let record = queue.wait(&id).unwrap();
        assert_eq!(record.status, TaskStatus::Failed);
        assert!(record.output.is_none());
        assert!(record.error.as_deref().unwrap().contains("equally long"));
    }

    #[test]
    fn each_submission_gets_its_own_id() {
        let queue = TaskQueue::new();
        let first = queue.submit(good_request());
        let second = queue.submit(good_request());
        assert_ne!(first, second);
        queue.wait(&first).unwrap();
        queue.wait(&second).unwrap();
        assert_eq!(queue.snapshot().len(), 2);
    }

    #[test]
    fn record_exists_immediately_after_submit() {
        let queue = TaskQueue::new();
        let id = queue.submit(good_request());
        let record = queue.status(&id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.experiment, ExperimentKind::Millikan);
        queue.wait(&id).unwrap();
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let queue = TaskQueue::new();
        assert!(queue.status("no-such-task").is_none());
        assert!(queue.wait("no-such-task").is_none());
    }

    #[test]
    fn failure_of_one_task_leaves_others_untouched() {
        let queue = TaskQueue::new();
        let good = queue.submit(good_request());
        let bad = queue.submit(bad_request());
        assert_eq!(queue.wait(&good).unwrap().status, TaskStatus::Completed);
        assert_eq!(queue.wait(&bad).unwrap().status, TaskStatus::Failed);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
