//! Async task lifecycle state.
//!
//! Every async operation gets a `TaskId`. The runtime wraps the
//! operation's result event in `TaskCompleted`; the reducer only
//! dispatches the inner event when the id still matches the active
//! task of its kind. Clearing the active id (e.g. on navigation)
//! therefore discards late results instead of applying them to a
//! disposed view.

use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    EmailAuth,
    GoogleAuth,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted {
    pub id: TaskId,
    pub result: Box<UiEvent>,
}

/// Task lifecycle state (stored in `AppState`, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub email_auth: TaskState,
    pub google_auth: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::EmailAuth => &self.email_auth,
            TaskKind::GoogleAuth => &self.google_auth,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::EmailAuth => &mut self.email_auth,
            TaskKind::GoogleAuth => &mut self.google_auth,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.email_auth.is_running() || self.google_auth.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_only_matches_the_active_id() {
        let mut state = TaskState::default();
        state.on_started(&TaskStarted {
            id: TaskId(1),
            cancel: None,
        });
        assert!(!state.finish_if_active(TaskId(0)));
        assert!(state.is_running());
        assert!(state.finish_if_active(TaskId(1)));
        assert!(!state.is_running());
    }

    #[test]
    fn cleared_state_discards_late_completion() {
        let mut state = TaskState::default();
        state.on_started(&TaskStarted {
            id: TaskId(7),
            cancel: None,
        });
        state.clear();
        assert!(!state.finish_if_active(TaskId(7)));
    }
}
