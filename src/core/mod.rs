pub mod backup;
pub mod dialog;
pub mod log;
pub mod screen;
pub mod state;
pub mod worker;

pub use screen::{Notice, TodoScreen};
