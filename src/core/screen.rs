//! The single screen: current list, edit dialog and user actions.
//!
//! Every action that touches the store goes through the background worker
//! and ends with a full reload, whose result replaces the whole snapshot.

use crate::core::dialog::EditDialog;
use crate::core::state::{Snapshot, TodoState};
use crate::core::worker::{DbWorker, Mutation};
use crate::db::TodoDao;
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::sync::mpsc::Receiver;

/// Transient confirmation shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Updated,
    Deleted,
    NotFound(i64),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Updated => write!(f, "Item updated"),
            Notice::Deleted => write!(f, "Item deleted"),
            Notice::NotFound(id) => write!(f, "No item with id #{}", id),
        }
    }
}

pub struct TodoScreen {
    state: TodoState,
    worker: DbWorker,
    dialog: EditDialog,
}

impl TodoScreen {
    /// Start the worker for `dao`. The list stays empty until [`TodoScreen::load`].
    pub fn new(dao: Box<dyn TodoDao + Send>) -> AppResult<Self> {
        Ok(Self {
            state: TodoState::new(),
            worker: DbWorker::spawn(dao)?,
            dialog: EditDialog::Hidden,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn dialog(&self) -> &EditDialog {
        &self.dialog
    }

    pub fn load(&mut self) -> AppResult<()> {
        let todos = self.worker.reload()?;
        self.state.replace(todos);
        Ok(())
    }

    /// Insert `text` as a new item. Empty text never reaches the store.
    pub fn add(&mut self, text: &str) -> AppResult<bool> {
        self.ensure_no_dialog()?;

        if text.is_empty() {
            return Ok(false);
        }

        let reloaded = self.worker.apply(Mutation::Insert(text.to_string()))?;
        self.state.replace(reloaded.todos);
        Ok(true)
    }

    /// Open the edit dialog on item `id`.
    pub fn begin_edit(&mut self, id: i64) -> AppResult<Option<Notice>> {
        self.ensure_no_dialog()?;

        let snap = self.state.snapshot();
        match snap.find(id) {
            Some(todo) => {
                self.dialog = EditDialog::open(todo.clone());
                Ok(None)
            }
            None => Ok(Some(Notice::NotFound(id))),
        }
    }

    pub fn edit_draft(&mut self, text: &str) -> AppResult<()> {
        if !self.dialog.is_visible() {
            return Err(AppError::NoEditInProgress);
        }
        self.dialog.set_draft(text);
        Ok(())
    }

    /// Close the dialog without saving. Returns whether it was open.
    pub fn dismiss_edit(&mut self) -> bool {
        self.dialog.take().is_some()
    }

    /// Save the draft title, close the dialog and reload.
    ///
    /// The edited record is spliced into the current snapshot before the
    /// update is dispatched; the reload that follows replaces the splice.
    pub fn save_edit(&mut self) -> AppResult<Notice> {
        let (todo, draft) = self.dialog.take().ok_or(AppError::NoEditInProgress)?;
        let edited = todo.with_title(draft);

        let before = self.state.snapshot();
        let mut spliced = before.todos.to_vec();
        if let Some(i) = spliced.iter().position(|t| t.id == edited.id) {
            spliced[i] = edited.clone();
            self.state.replace(spliced);
        }

        let id = edited.id;
        match self.worker.apply(Mutation::Update(edited)) {
            Ok(reloaded) => {
                self.state.replace(reloaded.todos);
                Ok(if reloaded.affected > 0 {
                    Notice::Updated
                } else {
                    Notice::NotFound(id)
                })
            }
            Err(e) => {
                self.state.replace(before.todos.to_vec());
                Err(e)
            }
        }
    }

    pub fn delete(&mut self, id: i64) -> AppResult<Notice> {
        self.ensure_no_dialog()?;

        let snap = self.state.snapshot();
        let Some(todo) = snap.find(id).cloned() else {
            return Ok(Notice::NotFound(id));
        };

        let reloaded = self.worker.apply(Mutation::Delete(todo))?;
        self.state.replace(reloaded.todos);

        Ok(if reloaded.affected > 0 {
            Notice::Deleted
        } else {
            Notice::NotFound(id)
        })
    }

    /// Stop the worker and close the store.
    pub fn shutdown(self) -> AppResult<()> {
        self.worker.shutdown()
    }

    fn ensure_no_dialog(&self) -> AppResult<()> {
        match self.dialog.editing() {
            Some(todo) => Err(AppError::EditInProgress(todo.id)),
            None => Ok(()),
        }
    }
}
