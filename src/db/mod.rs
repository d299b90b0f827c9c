pub mod dao;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod stats;

pub use dao::{SqliteTodoDao, TodoDao};
pub use pool::DbPool;
