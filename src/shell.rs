// Line-oriented front end: parses commands, drives the store, renders the view

use crate::error::StoreError;
use crate::filter::{ParseTabError, Tab};
use crate::render::{self, Style};
use crate::store::Store;
use crate::view::ViewState;
use eyre::{Context, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const HELP: &str = "\
commands:
  add <title>        append a new task
  toggle <row>       mark the task on that row finished / unfinished
  delete <row>       remove the task on that row (alias: rm)
  tab <name>         show all, todo or finished tasks
  search [text]      filter by title; no text clears the search
  list               show the current view (alias: ls)
  help               show this help
  quit               leave (alias: exit)";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Tab(Tab),
    Search(String),
    List,
    Help,
    Quit,
}

/// Errors from parsing a command line
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a row number")]
    BadRow(String),

    #[error(transparent)]
    BadTab(#[from] ParseTabError),
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "add" => Ok(Command::Add(rest.to_string())),
            "toggle" => parse_row("toggle", rest).map(Command::Toggle),
            "delete" | "rm" => parse_row("delete", rest).map(Command::Delete),
            "tab" => {
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument("tab"));
                }
                Ok(Command::Tab(rest.parse()?))
            }
            "search" => Ok(Command::Search(rest.to_string())),
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(ShellError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_row(command: &'static str, arg: &str) -> Result<usize, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::MissingArgument(command));
    }
    arg.parse().map_err(|_| ShellError::BadRow(arg.to_string()))
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session over a store
pub struct Shell {
    store: Store,
    view: ViewState,
    style: Style,
    prompt: String,
    changes: Rc<RefCell<Vec<serde_json::Result<String>>>>,
}

impl Shell {
    pub fn new(mut store: Store, view: ViewState, style: Style, prompt: impl Into<String>) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        if style == Style::Json {
            store.subscribe({
                let changes = changes.clone();
                move |change, tasks| changes.borrow_mut().push(render::change_json(change, tasks))
            });
        }

        Self {
            store,
            view,
            style,
            prompt: prompt.into(),
            changes,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Render the current view
    pub fn render(&self) -> Result<String> {
        render::view(&self.view, &self.view.rows(&self.store), self.style).context("Failed to render view")
    }

    /// Read commands until EOF or `quit`
    ///
    /// The prompt is written before each line only when `interactive` is set.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, interactive: bool) -> Result<()> {
        info!(tab = %self.view.tab, tasks = self.store.len(), "Shell started");
        writeln!(out, "{}", self.render()?)?;

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }

            let line = match lines.next() {
                Some(line) => line.context("Failed to read command")?,
                None => break,
            };

            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
        }

        info!("Shell finished");
        Ok(())
    }

    /// Parse and execute one input line, writing any output
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", render::error(&e, self.style)?)?;
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "handle_line");
        if command == Command::Help {
            writeln!(out, "{}", render::message("help", HELP, self.style)?)?;
            return Ok(Flow::Continue);
        }

        match self.execute(command) {
            Ok(Flow::Quit) => return Ok(Flow::Quit),
            Ok(Flow::Continue) => {}
            Err(e) => {
                writeln!(out, "{}", render::error(&e, self.style)?)?;
                return Ok(Flow::Continue);
            }
        }

        self.flush_output(out)?;
        Ok(Flow::Continue)
    }

    /// Apply a command to the store or view state
    pub fn execute(&mut self, command: Command) -> Result<Flow, StoreError> {
        match command {
            Command::Add(title) => match self.store.add_task(&title) {
                Ok(_) => {}
                Err(StoreError::EmptyInput) => debug!("Ignoring blank title"),
                Err(e) => return Err(e),
            },
            Command::Toggle(row) => {
                let id = self.view.resolve(&self.store, row)?;
                self.store.toggle_task(id)?;
            }
            Command::Delete(row) => {
                let id = self.view.resolve(&self.store, row)?;
                self.store.delete_task(id)?;
            }
            Command::Tab(tab) => self.view.set_tab(tab),
            Command::Search(query) => self.view.set_search(query),
            Command::List | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Emit pending change lines in JSON mode, otherwise re-render the view
    fn flush_output<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let changes: Vec<serde_json::Result<String>> = self.changes.borrow_mut().drain(..).collect();

        if changes.is_empty() {
            writeln!(out, "{}", self.render()?)?;
            return Ok(());
        }
        for change in changes {
            writeln!(out, "{}", change.context("Failed to serialize change")?)?;
        }
        Ok(())
    }
}
