use std::collections::BTreeMap;

use crate::{DownloadTask, MediaKind, ProgressEvent, TaskId, TaskStatus};

/// A mutation the presentation layer has to reconcile.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryChange {
    Upserted(DownloadTask),
    Removed(DownloadTask),
}

/// Identifies one terminal hold. A removal timer carrying a stale ticket
/// (the task was removed and recreated meanwhile) does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoldTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    /// Unknown id, or the task is already terminal.
    Ignored,
    Updated,
    /// The task just became terminal; removal must be scheduled.
    Terminal(HoldTicket),
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    seq: u64,
    task: DownloadTask,
    hold: Option<HoldTicket>,
}

/// Live download tasks keyed by id.
///
/// Every mutation queues a [`RegistryChange`]; callers drain them with
/// [`TaskRegistry::drain_changes`] and hand them to the reconciler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskRegistry {
    entries: BTreeMap<TaskId, Entry>,
    next_seq: u64,
    next_ticket: u64,
    next_local: u64,
    changes: Vec<RegistryChange>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a session-unique fallback key for targets without a media id.
    pub fn allocate_local_id(&mut self) -> TaskId {
        self.next_local += 1;
        TaskId::local(self.next_local)
    }

    /// Inserts a `Queued` task at 0%. Returns `false` and leaves the existing
    /// entry untouched when `id` is already tracked.
    pub fn create(&mut self, id: TaskId, title: impl Into<String>, kind: MediaKind) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.next_seq += 1;
        let task = DownloadTask::queued(id.clone(), title, kind);
        self.changes.push(RegistryChange::Upserted(task.clone()));
        self.entries.insert(
            id,
            Entry {
                seq: self.next_seq,
                task,
                hold: None,
            },
        );
        true
    }

    /// Applies a server progress report in arrival order.
    ///
    /// No ordering guard: a stale, lower percentage overwrites a newer one.
    pub fn apply_progress(&mut self, event: &ProgressEvent) -> ProgressOutcome {
        let Some(entry) = self.entries.get_mut(&event.id) else {
            return ProgressOutcome::Ignored;
        };
        if entry.task.status.is_terminal() {
            return ProgressOutcome::Ignored;
        }

        let task = &mut entry.task;
        if let Some(title) = event.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                task.title = title.to_string();
            }
        }
        task.status = event.status;
        task.progress = match event.status {
            TaskStatus::Completed => 100.0,
            _ => clamp_progress(event.progress),
        };
        task.error_message = event.error.clone();

        let outcome = if task.status.is_terminal() {
            self.next_ticket += 1;
            let ticket = HoldTicket(self.next_ticket);
            entry.hold = Some(ticket);
            ProgressOutcome::Terminal(ticket)
        } else {
            ProgressOutcome::Updated
        };
        self.changes.push(RegistryChange::Upserted(entry.task.clone()));
        outcome
    }

    /// Removes `id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        match self.entries.remove(id) {
            Some(entry) => {
                self.changes.push(RegistryChange::Removed(entry.task));
                true
            }
            None => false,
        }
    }

    /// Ends a terminal hold. Only removes the entry the ticket was issued for.
    pub fn expire(&mut self, id: &TaskId, ticket: HoldTicket) -> bool {
        let matches = self
            .entries
            .get(id)
            .is_some_and(|entry| entry.hold == Some(ticket));
        matches && self.remove(id)
    }

    pub fn get(&self, id: &TaskId) -> Option<&DownloadTask> {
        self.entries.get(id).map(|entry| &entry.task)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tasks in creation order.
    pub fn tasks(&self) -> Vec<&DownloadTask> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| &entry.task).collect()
    }

    pub fn drain_changes(&mut self) -> Vec<RegistryChange> {
        std::mem::take(&mut self.changes)
    }
}

fn clamp_progress(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
