use crate::cli::commands::open_screen;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Add a new item.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { title } = cmd {
        let mut screen = open_screen(cfg)?;

        if screen.add(title)? {
            let snap = screen.snapshot();
            match snap.todos.last() {
                Some(t) => success(format!("Added #{}: {}", t.id, t.title)),
                None => success("Item added."),
            }
        } else {
            warning("Nothing to add: the title is empty.");
        }

        screen.shutdown()?;
    }

    Ok(())
}
