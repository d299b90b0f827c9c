use crate::cli::commands::{open_screen, parse_id};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Notice;
use crate::errors::AppResult;
use crate::ui::messages::{notice, warning};

/// Change the title of an item: open the dialog, fill the draft, save.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, title } = cmd {
        let id = parse_id(id)?;
        let mut screen = open_screen(cfg)?;

        let outcome = match screen.begin_edit(id)? {
            Some(missing) => missing,
            None => {
                screen.edit_draft(title)?;
                screen.save_edit()?
            }
        };

        match outcome {
            Notice::NotFound(_) => warning(outcome),
            _ => notice(outcome),
        }

        screen.shutdown()?;
    }

    Ok(())
}
