//! Explicit state container for the displayed list.
//!
//! The container owns the only mutable copy of the list. Readers get an
//! immutable [`Snapshot`]; renderers subscribe and receive every new
//! snapshot over a channel instead of touching a shared list.

use crate::models::Todo;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Immutable, versioned view of the list.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub todos: Arc<Vec<Todo>>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }
}

#[derive(Default)]
pub struct TodoState {
    version: u64,
    todos: Arc<Vec<Todo>>,
    subscribers: Vec<Sender<Snapshot>>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            todos: Arc::clone(&self.todos),
        }
    }

    /// Discard the current list and publish `todos` as the new snapshot.
    pub fn replace(&mut self, todos: Vec<Todo>) {
        self.version += 1;
        self.todos = Arc::new(todos);

        let snap = self.snapshot();
        // Receivers that went away are dropped here.
        self.subscribers.retain(|tx| tx.send(snap.clone()).is_ok());
    }

    /// Register a renderer. The current snapshot is delivered immediately.
    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        let (tx, rx) = mpsc::channel();
        if tx.send(self.snapshot()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }
}
