use crate::cli::commands::open_screen;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::{RenderOptions, render_list};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { json } = cmd {
        let screen = open_screen(cfg)?;
        let snap = screen.snapshot();

        if *json {
            println!("{}", serde_json::to_string_pretty(&*snap.todos)?);
        } else {
            header(format!("To-do ({})", snap.len()));
            print!("{}", render_list(&snap.todos, &RenderOptions::from_config(cfg)));
        }

        screen.shutdown()?;
    }

    Ok(())
}
