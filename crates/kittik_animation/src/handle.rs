//! Handles to spawned animation runs

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{AnimationError, Result};
use crate::shape::{Shape, SharedShape};

/// Lifecycle of one property animation run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl RunState {
    pub fn is_finished(self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed | RunState::Cancelled)
    }
}

/// A property animation running as its own task.
///
/// Dropping the handle cancels the run; call [`detach`](Self::detach) to let
/// it finish unobserved.
pub struct AnimationHandle<S: Shape> {
    task: JoinHandle<Result<SharedShape<S>>>,
    state: watch::Receiver<RunState>,
    cancel: CancellationToken,
    guard: Option<DropGuard>,
}

impl<S: Shape> AnimationHandle<S> {
    pub(crate) fn new(
        task: JoinHandle<Result<SharedShape<S>>>,
        state: watch::Receiver<RunState>,
        cancel: CancellationToken,
    ) -> Self {
        let guard = Some(cancel.clone().drop_guard());
        Self {
            task,
            state,
            cancel,
            guard,
        }
    }

    /// Stop the run at its next tick
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Token that cancels this run when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait until the run reaches a terminal state
    pub async fn finished(&mut self) -> RunState {
        match self.state.wait_for(|state| state.is_finished()).await {
            Ok(state) => *state,
            // Sender gone without a terminal state: the task died
            Err(_) => RunState::Failed,
        }
    }

    /// Let the run continue after the handle is dropped
    pub fn detach(mut self) {
        if let Some(guard) = self.guard.take() {
            guard.disarm();
        }
    }

    /// Wait for the run and return its target
    pub async fn join(self) -> Result<SharedShape<S>> {
        let Self { task, guard, .. } = self;
        let outcome = task.await;
        drop(guard);
        outcome.map_err(|err| AnimationError::Join(err.to_string()))?
    }
}
