use crate::cli::commands::{open_screen, parse_id};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Notice;
use crate::errors::AppResult;
use crate::ui::messages::{info, notice, warning};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let id = parse_id(id)?;
        let mut screen = open_screen(cfg)?;

        let snap = screen.snapshot();
        let Some(todo) = snap.find(id).cloned() else {
            warning(Notice::NotFound(id));
            return screen.shutdown();
        };

        if cfg.confirm_delete
            && !*yes
            && !ask_confirmation(&format!(
                "Delete #{} \"{}\"? This action is irreversible.",
                todo.id, todo.title
            ))
        {
            info("Operation cancelled.");
            return screen.shutdown();
        }

        match screen.delete(id)? {
            missing @ Notice::NotFound(_) => warning(missing),
            done => notice(done),
        }

        screen.shutdown()?;
    }

    Ok(())
}
