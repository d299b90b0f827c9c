//! Interactive screen.
//!
//! Reads one command per line. The list is redrawn from the snapshots the
//! state container publishes; when several arrive between two commands
//! (edit splice, then reload) only the latest is drawn.

use crate::cli::commands::{open_screen, parse_id};
use crate::config::Config;
use crate::core::state::Snapshot;
use crate::core::{Notice, TodoScreen};
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, notice, warning};
use crate::ui::render::{RenderOptions, render_list};
use crate::utils::formatting::truncate;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

const HELP: &str = "\
Commands:
  add <title>     add a new item
  edit <id>       open the edit dialog on an item
  save [<title>]  save the dialog (keeps the current title when omitted)
  cancel          close the dialog without saving
  del <id>        delete an item
  list            redraw the list
  help            show this help
  quit            leave (also: exit, Ctrl-D)";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Add(&'a str),
    Edit(&'a str),
    Save(Option<&'a str>),
    Cancel,
    Del(&'a str),
    List,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse(line: &str) -> ShellCommand<'_> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "" => ShellCommand::Empty,
        "add" | "a" => ShellCommand::Add(rest),
        "edit" | "e" => ShellCommand::Edit(rest),
        "save" | "s" => ShellCommand::Save(Some(rest).filter(|r| !r.is_empty())),
        "cancel" | "c" => ShellCommand::Cancel,
        "del" | "d" | "rm" => ShellCommand::Del(rest),
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other),
    }
}

struct Shell<'a> {
    screen: &'a mut TodoScreen,
    frames: Receiver<Snapshot>,
    opts: RenderOptions,
}

impl Shell<'_> {
    fn draw(&self, snap: &Snapshot) {
        println!();
        header(format!("To-do ({})", snap.len()));
        print!("{}", render_list(&snap.todos, &self.opts));
        if let (Some(todo), Some(draft)) = (self.screen.dialog().editing(), self.screen.dialog().draft())
        {
            info(format!(
                "Editing #{} \"{}\" (save <title> | cancel)",
                todo.id,
                truncate(draft, self.opts.width)
            ));
        }
    }

    /// Draw the newest pending snapshot, if any.
    fn redraw_pending(&self) {
        if let Some(latest) = self.frames.try_iter().last() {
            self.draw(&latest);
        }
    }

    fn prompt(&self) {
        match self.screen.dialog().editing() {
            Some(t) => print!("edit #{}> ", t.id),
            None => print!("> "),
        }
        let _ = io::stdout().flush();
    }

    fn show(&self, n: Notice) {
        match n {
            Notice::NotFound(_) => warning(n),
            _ => notice(n),
        }
    }

    /// Execute one command. Returns `false` when the shell should stop.
    fn step(&mut self, cmd: ShellCommand<'_>) -> AppResult<bool> {
        match cmd {
            ShellCommand::Add(title) => {
                if !self.screen.add(title)? {
                    warning("Nothing to add: the title is empty.");
                }
            }
            ShellCommand::Edit(raw) => {
                if let Some(n) = self.screen.begin_edit(parse_id(raw)?)? {
                    self.show(n);
                } else {
                    self.draw(&self.screen.snapshot());
                }
            }
            ShellCommand::Save(title) => {
                if let Some(t) = title {
                    self.screen.edit_draft(t)?;
                }
                let n = self.screen.save_edit()?;
                self.show(n);
            }
            ShellCommand::Cancel => {
                if !self.screen.dismiss_edit() {
                    info("No edit in progress.");
                }
            }
            ShellCommand::Del(raw) => {
                let n = self.screen.delete(parse_id(raw)?)?;
                self.show(n);
            }
            ShellCommand::List => self.draw(&self.screen.snapshot()),
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Empty => {}
            ShellCommand::Unknown(verb) => {
                warning(format!("Unknown command '{}'. Type 'help'.", verb));
            }
        }
        Ok(true)
    }
}

/// Drive `screen` from `input` until `quit` or end of input.
///
/// Command errors are printed and the loop goes on with the last good list.
pub fn run<R: BufRead>(screen: &mut TodoScreen, input: R, opts: RenderOptions) -> AppResult<()> {
    let frames = screen.subscribe();
    let mut shell = Shell {
        screen,
        frames,
        opts,
    };

    shell.redraw_pending();
    shell.prompt();

    for line in input.lines() {
        let line = line?;
        match shell.step(parse(&line)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => error(e),
        }
        shell.redraw_pending();
        shell.prompt();
    }

    println!();
    Ok(())
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut screen = open_screen(cfg)?;

    let stdin = io::stdin();
    let result = run(&mut screen, stdin.lock(), RenderOptions::from_config(cfg));

    screen.shutdown()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_arguments() {
        assert_eq!(parse("add Buy milk\n"), ShellCommand::Add("Buy milk"));
        assert_eq!(parse("a  two spaces"), ShellCommand::Add("two spaces"));
        assert_eq!(parse("add   \r\n"), ShellCommand::Add(""));
        assert_eq!(parse("save   "), ShellCommand::Save(None));
        assert_eq!(parse("add"), ShellCommand::Add(""));
        assert_eq!(parse("edit 3"), ShellCommand::Edit("3"));
        assert_eq!(parse("save"), ShellCommand::Save(None));
        assert_eq!(parse("save New title"), ShellCommand::Save(Some("New title")));
        assert_eq!(parse("del #2"), ShellCommand::Del("#2"));
        assert_eq!(parse("   "), ShellCommand::Empty);
        assert_eq!(parse("exit"), ShellCommand::Quit);
        assert_eq!(parse("frobnicate 1"), ShellCommand::Unknown("frobnicate"));
    }
}
