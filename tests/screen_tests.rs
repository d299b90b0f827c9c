use chrono::Local;
use rtodo::core::dialog::EditDialog;
use rtodo::core::{Notice, TodoScreen};
use rtodo::db::{DbPool, SqliteTodoDao, TodoDao};
use rtodo::errors::{AppError, AppResult};
use rtodo::models::Todo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Call counters shared between the test and the DAO living on the worker.
#[derive(Clone, Default)]
struct Calls {
    list: Arc<AtomicUsize>,
    insert: Arc<AtomicUsize>,
    update: Arc<AtomicUsize>,
    delete: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl Calls {
    fn mutations(&self) -> usize {
        self.insert.load(Ordering::SeqCst)
            + self.update.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

/// In-memory DAO that counts calls and can be told to fail updates.
#[derive(Default)]
struct MemoryDao {
    rows: Mutex<Vec<Todo>>,
    next_id: AtomicUsize,
    calls: Calls,
    fail_updates: bool,
}

impl MemoryDao {
    fn with_calls(calls: Calls) -> Self {
        Self {
            calls,
            ..Self::default()
        }
    }
}

impl TodoDao for MemoryDao {
    fn list_all(&self) -> AppResult<Vec<Todo>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().expect("lock").clone())
    }

    fn insert(&self, title: &str) -> AppResult<()> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        self.rows
            .lock()
            .expect("lock")
            .push(Todo::new(id, title, Local::now()));
        Ok(())
    }

    fn update(&self, todo: &Todo) -> AppResult<usize> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates {
            return Err(AppError::Other("disk full".into()));
        }
        let mut rows = self.rows.lock().expect("lock");
        match rows.iter_mut().find(|t| t.id == todo.id) {
            Some(row) => {
                row.title = todo.title.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&self, todo: &Todo) -> AppResult<usize> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|t| t.id != todo.id);
        Ok(before - rows.len())
    }

    fn close(self: Box<Self>) -> AppResult<()> {
        self.calls.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn screen_with(dao: MemoryDao) -> TodoScreen {
    let mut screen = TodoScreen::new(Box::new(dao)).expect("spawn worker");
    screen.load().expect("load");
    screen
}

fn titles(screen: &TodoScreen) -> Vec<String> {
    screen
        .snapshot()
        .todos
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[test]
fn test_empty_title_never_reaches_the_store() {
    let calls = Calls::default();
    let mut screen = screen_with(MemoryDao::with_calls(calls.clone()));
    let lists_before = calls.list.load(Ordering::SeqCst);

    assert!(!screen.add("").expect("add"));

    assert_eq!(calls.mutations(), 0);
    assert_eq!(calls.list.load(Ordering::SeqCst), lists_before);
    assert!(screen.snapshot().is_empty());
}

#[test]
fn test_every_mutation_is_followed_by_a_full_reload() {
    let calls = Calls::default();
    let mut screen = screen_with(MemoryDao::with_calls(calls.clone()));
    assert_eq!(calls.list.load(Ordering::SeqCst), 1);

    screen.add("one").expect("add");
    screen.add("two").expect("add");
    assert_eq!(calls.list.load(Ordering::SeqCst), 3);

    screen.begin_edit(1).expect("begin edit");
    screen.edit_draft("uno").expect("draft");
    screen.save_edit().expect("save");
    assert_eq!(calls.list.load(Ordering::SeqCst), 4);

    screen.delete(2).expect("delete");
    assert_eq!(calls.list.load(Ordering::SeqCst), 5);

    assert_eq!(titles(&screen), vec!["uno"]);
}

#[test]
fn test_save_edit_splices_then_reloads() {
    let mut screen = screen_with(MemoryDao::default());
    screen.add("alpha").expect("add");
    screen.add("beta").expect("add");

    let frames = screen.subscribe();
    screen.begin_edit(2).expect("begin edit");
    screen.edit_draft("BETA").expect("draft");
    assert_eq!(screen.save_edit().expect("save"), Notice::Updated);

    let seen: Vec<_> = frames.try_iter().collect();
    // current list on subscribe, the splice, the reload
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].find(2).map(|t| t.title.as_str()), Some("beta"));
    assert_eq!(seen[1].find(2).map(|t| t.title.as_str()), Some("BETA"));
    assert_eq!(seen[2].find(2).map(|t| t.title.as_str()), Some("BETA"));
    assert!(seen[0].version < seen[1].version && seen[1].version < seen[2].version);

    assert_eq!(*screen.dialog(), EditDialog::Hidden);
}

#[test]
fn test_edit_dialog_state_machine() {
    let mut screen = screen_with(MemoryDao::default());
    screen.add("task").expect("add");

    assert!(!screen.dialog().is_visible());
    assert!(matches!(
        screen.save_edit(),
        Err(AppError::NoEditInProgress)
    ));

    assert_eq!(screen.begin_edit(1).expect("begin"), None);
    assert_eq!(screen.dialog().draft(), Some("task"));

    // modal: other actions are refused while the dialog is open
    assert!(matches!(screen.add("x"), Err(AppError::EditInProgress(1))));
    assert!(matches!(screen.delete(1), Err(AppError::EditInProgress(1))));
    assert!(matches!(
        screen.begin_edit(1),
        Err(AppError::EditInProgress(1))
    ));

    assert!(screen.dismiss_edit());
    assert!(!screen.dismiss_edit());
    assert_eq!(titles(&screen), vec!["task"]);
}

#[test]
fn test_begin_edit_unknown_id() {
    let mut screen = screen_with(MemoryDao::default());
    assert_eq!(
        screen.begin_edit(9).expect("begin"),
        Some(Notice::NotFound(9))
    );
    assert!(!screen.dialog().is_visible());
}

#[test]
fn test_delete_unknown_id_makes_no_store_call() {
    let calls = Calls::default();
    let mut screen = screen_with(MemoryDao::with_calls(calls.clone()));

    assert_eq!(screen.delete(5).expect("delete"), Notice::NotFound(5));
    assert_eq!(calls.delete.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failed_update_restores_previous_list() {
    let dao = MemoryDao {
        fail_updates: true,
        ..MemoryDao::default()
    };
    let mut screen = screen_with(dao);
    screen.add("stable").expect("add");

    screen.begin_edit(1).expect("begin");
    screen.edit_draft("lost").expect("draft");
    let err = screen.save_edit().expect_err("update fails");
    assert!(err.to_string().contains("disk full"));

    assert_eq!(titles(&screen), vec!["stable"]);
    assert!(!screen.dialog().is_visible());

    // the worker is still usable
    screen.add("after failure").expect("add");
    assert_eq!(titles(&screen), vec!["stable", "after failure"]);
}

#[test]
fn test_shutdown_closes_the_store() {
    let calls = Calls::default();
    let screen = screen_with(MemoryDao::with_calls(calls.clone()));
    screen.shutdown().expect("shutdown");
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dropping_the_screen_stops_the_worker() {
    let calls = Calls::default();
    {
        let _screen = screen_with(MemoryDao::with_calls(calls.clone()));
    }
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_round_trip_on_sqlite() {
    let dao = SqliteTodoDao::open(DbPool::open_in_memory().expect("open")).expect("migrate");
    let mut screen = TodoScreen::new(Box::new(dao)).expect("spawn");
    screen.load().expect("load");

    screen.add("write report").expect("add");
    let inserted = screen.snapshot().todos[0].clone();

    screen.begin_edit(inserted.id).expect("begin");
    screen.edit_draft("write final report").expect("draft");
    assert_eq!(screen.save_edit().expect("save"), Notice::Updated);

    let snap = screen.snapshot();
    assert_eq!(snap.len(), 1);
    let updated = &snap.todos[0];
    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.created_at, inserted.created_at);
    assert_eq!(updated.title, "write final report");

    assert_eq!(screen.delete(inserted.id).expect("delete"), Notice::Deleted);
    assert!(screen.snapshot().is_empty());

    screen.shutdown().expect("shutdown");
}

#[test]
fn test_dropped_subscribers_are_pruned() {
    let mut screen = screen_with(MemoryDao::default());
    let kept = screen.subscribe();
    drop(screen.subscribe());

    screen.add("ping").expect("add");

    // initial snapshot + one reload
    assert_eq!(kept.try_iter().count(), 2);
}
