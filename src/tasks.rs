//! Keyed async task pool.
//!
//! Tasks are identified by a key and are mutually exclusive per key:
//! spawning with a key that is already running aborts the previous task
//! first. An aborted task never sends its action, which is what guarantees
//! that a superseded fetch can't touch state. Cancelling is unconditional
//! and idempotent.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::action::Action;

/// Manages async task lifecycle with automatic same-key cancellation.
pub struct TaskPool {
    tasks: HashMap<&'static str, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskPool {
    /// The channel delivers each task's resulting action to the main loop.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any running task with the same key.
    ///
    /// The future's action is sent to the main loop on completion; an
    /// aborted task sends nothing.
    pub fn spawn<F>(&mut self, key: &'static str, future: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.cancel(key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
    }

    /// Spawn a repeating task that emits an action every `period`.
    pub fn interval<F>(&mut self, key: &'static str, period: Duration, action_fn: F)
    where
        F: Fn() -> Action + Send + 'static,
    {
        self.cancel(key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                if tx.send(action_fn()).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(key, handle.abort_handle());
    }

    /// Abort a task by key. No-op when nothing runs under that key.
    pub fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Abort every running task (shutdown).
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task with the given key is currently registered.
    pub fn is_running(&self, key: &str) -> bool {
        self.tasks.contains_key(key)
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
