//! Background store worker.
//!
//! The DAO lives on its own thread. The screen sends a job and blocks on the
//! job's reply channel; each job runs its mutation and the full reload back
//! to back, so a reply always carries the list as it is after the mutation.

use crate::db::TodoDao;
use crate::errors::{AppError, AppResult};
use crate::models::Todo;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// A store mutation requested by the screen.
#[derive(Debug, Clone)]
pub enum Mutation {
    Insert(String),
    Update(Todo),
    Delete(Todo),
}

/// Outcome of a job: rows touched by the mutation and the reloaded list.
#[derive(Debug)]
pub struct Reloaded {
    pub affected: usize,
    pub todos: Vec<Todo>,
}

enum Request {
    Reload,
    Apply(Mutation),
}

struct Job {
    request: Request,
    reply: Sender<AppResult<Reloaded>>,
}

pub struct DbWorker {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<AppResult<()>>>,
}

impl DbWorker {
    /// Move `dao` onto a new worker thread.
    pub fn spawn(dao: Box<dyn TodoDao + Send>) -> AppResult<Self> {
        let (tx, rx) = mpsc::channel::<Job>();

        let handle = thread::Builder::new()
            .name("rtodo-db".to_string())
            .spawn(move || run(dao, rx))?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Full reload with no mutation.
    pub fn reload(&self) -> AppResult<Vec<Todo>> {
        Ok(self.call(Request::Reload)?.todos)
    }

    /// Run `mutation`, then reload.
    pub fn apply(&self, mutation: Mutation) -> AppResult<Reloaded> {
        self.call(Request::Apply(mutation))
    }

    fn call(&self, request: Request) -> AppResult<Reloaded> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| AppError::Worker("worker already stopped".into()))?;

        let (reply_tx, reply_rx) = mpsc::channel();
        tx.send(Job {
            request,
            reply: reply_tx,
        })
        .map_err(|_| AppError::Worker("worker thread is gone".into()))?;

        reply_rx
            .recv()
            .map_err(|_| AppError::Worker("worker dropped the reply".into()))?
    }

    /// Stop accepting jobs, wait for the thread and close the store.
    pub fn shutdown(mut self) -> AppResult<()> {
        self.stop()
    }

    fn stop(&mut self) -> AppResult<()> {
        drop(self.tx.take());

        match self.handle.take() {
            Some(h) => h
                .join()
                .map_err(|_| AppError::Worker("worker thread panicked".into()))?,
            None => Ok(()),
        }
    }
}

impl Drop for DbWorker {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn run(dao: Box<dyn TodoDao + Send>, rx: Receiver<Job>) -> AppResult<()> {
    // Ends once every sender is dropped.
    for job in rx {
        let result = execute(&*dao, job.request);
        // The caller may have given up on the reply.
        let _ = job.reply.send(result);
    }

    dao.close()
}

fn execute(dao: &dyn TodoDao, request: Request) -> AppResult<Reloaded> {
    let affected = match request {
        Request::Reload => 0,
        Request::Apply(Mutation::Insert(title)) => {
            dao.insert(&title)?;
            1
        }
        Request::Apply(Mutation::Update(todo)) => dao.update(&todo)?,
        Request::Apply(Mutation::Delete(todo)) => dao.delete(&todo)?,
    };

    let todos = dao.list_all()?;
    Ok(Reloaded { affected, todos })
}
