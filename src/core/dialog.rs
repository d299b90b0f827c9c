use crate::models::Todo;

/// Edit dialog: either closed, or open on one record with a draft title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditDialog {
    #[default]
    Hidden,
    Visible { todo: Todo, draft: String },
}

impl EditDialog {
    /// Open on `todo`; the draft starts as the current title.
    pub fn open(todo: Todo) -> Self {
        let draft = todo.title.clone();
        EditDialog::Visible { todo, draft }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, EditDialog::Visible { .. })
    }

    pub fn editing(&self) -> Option<&Todo> {
        match self {
            EditDialog::Visible { todo, .. } => Some(todo),
            EditDialog::Hidden => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditDialog::Visible { draft, .. } => Some(draft),
            EditDialog::Hidden => None,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditDialog::Visible { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// Close the dialog, returning the record and the draft if it was open.
    pub fn take(&mut self) -> Option<(Todo, String)> {
        match std::mem::take(self) {
            EditDialog::Visible { todo, draft } => Some((todo, draft)),
            EditDialog::Hidden => None,
        }
    }
}
