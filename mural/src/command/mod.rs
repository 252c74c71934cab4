//! The `gui*` verbs the scripting runtime calls into.
//!
//! Every verb receives three argument lists (options, targets and plain arguments) and
//! answers with a status code and a message. Handlers never fail any other way.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::gui::GuiData;

pub mod audio;
pub mod bus;
pub mod export;
pub mod import;
pub mod set;
pub mod show;

use audio::GuiAudio;
use export::GuiExport;
use import::GuiImport;
use set::GuiSet;
use show::GuiShow;

pub const STATUS_OK: i32 = 0;
pub const STATUS_UNKNOWN_VERB: i32 = 1;
/// Missing or unknown option, or a verb whose collaborator is not there at all.
pub const STATUS_BAD_OPTION: i32 = 2;
/// Missing argument, invalid value or missing HUD/menu.
pub const STATUS_BAD_ARGS: i32 = 3;
pub const STATUS_IO: i32 = 4;
pub const STATUS_AUDIO: i32 = 5;

/// A parsed verb invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub option_args: Vec<String>,
    pub target_args: Vec<String>,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(verb: &str) -> Self {
        Self {
            verb: verb.to_string(),
            ..Default::default()
        }
    }

    pub fn with_option(mut self, option: &str) -> Self {
        self.option_args.push(option.to_string());
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target_args.push(target.to_string());
        self
    }

    pub fn with_arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Parses `verb [-o option...] [-t target...] [-a arg...]`, or the shorthand
    /// `verb option [arg...]`. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let mut command = Self::new(tokens.next()?);
        let tokens: Vec<&str> = tokens.collect();

        if !tokens.iter().any(|t| matches!(*t, "-o" | "-t" | "-a")) {
            let mut rest = tokens.into_iter();
            command.option_args.extend(rest.next().map(str::to_string));
            command.args.extend(rest.map(str::to_string));
            return Some(command);
        }

        // tokens before the first flag are options
        let mut list = &mut command.option_args;
        for token in tokens {
            match token {
                "-o" => list = &mut command.option_args,
                "-t" => list = &mut command.target_args,
                "-a" => list = &mut command.args,
                _ => list.push(token.to_string()),
            }
        }
        Some(command)
    }

    pub fn option(&self) -> Option<&str> {
        self.option_args.first().map(String::as_str)
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Status code and message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub code: i32,
    pub message: String,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: STATUS_OK,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == STATUS_OK
    }
}

impl std::fmt::Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A failed command, with its status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub code: i32,
    pub message: String,
}

impl CommandError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn option(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_OPTION, message)
    }

    pub fn args(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_ARGS, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(STATUS_IO, message)
    }
}

impl From<CommandError> for CommandResult {
    fn from(error: CommandError) -> Self {
        Self {
            code: error.code,
            message: error.message,
        }
    }
}

impl From<Result<String, CommandError>> for CommandResult {
    fn from(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(error) => error.into(),
        }
    }
}

pub trait CommandHandler {
    fn call(&self, gui: &mut GuiData, cmd: &Command) -> CommandResult;
}

type HandlerTable = HashMap<String, Box<dyn CommandHandler + Send + Sync>>;

/// Adds `handler` under `verb` unless the verb is taken. The first registration wins.
fn register(table: &mut HandlerTable, verb: &str, handler: Box<dyn CommandHandler + Send + Sync>) -> bool {
    if table.contains_key(verb) {
        log::warn!("verb {} is already registered, ignoring the new handler", verb);
        return false;
    }
    table.insert(verb.to_string(), handler);
    true
}

lazy_static! {
    static ref COMMAND_TBL: HandlerTable = {
        let mut m: HandlerTable = HashMap::new();

        register(&mut m, "guishow", Box::new(GuiShow));
        register(&mut m, "guiset", Box::new(GuiSet));
        register(&mut m, "guiexport", Box::new(GuiExport));
        register(&mut m, "guiimport", Box::new(GuiImport));
        register(&mut m, "guiaudio", Box::new(GuiAudio));

        m
    };
}

/// Registered verbs, sorted.
pub fn verbs() -> Vec<&'static str> {
    let mut verbs: Vec<&str> = COMMAND_TBL.keys().map(String::as_str).collect();
    verbs.sort_unstable();
    verbs
}

/// Runs `cmd` against the session.
pub fn dispatch(gui: &mut GuiData, cmd: &Command) -> CommandResult {
    let result = match COMMAND_TBL.get(&cmd.verb) {
        Some(handler) => handler.call(gui, cmd),
        None => CommandError::new(STATUS_UNKNOWN_VERB, format!("unknown command: {}", cmd.verb)).into(),
    };
    if result.is_ok() {
        log::debug!("{} {:?}: {}", cmd.verb, cmd.option_args, result.message);
    } else {
        log::error!("{} {:?}: {}", cmd.verb, cmd.option_args, result);
    }
    result
}

/// Parses and runs one line. Blank lines and `#` comments give `None`.
pub fn dispatch_line(gui: &mut GuiData, line: &str) -> Option<CommandResult> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    Command::parse(line).map(|cmd| dispatch(gui, &cmd))
}

/// The option of `cmd`, or a status 2 error naming the accepted ones.
fn required_option<'a>(cmd: &'a Command, accepted: &[&str]) -> Result<&'a str, CommandError> {
    cmd.option()
        .ok_or_else(|| CommandError::option(format!("no option given, expected one of: {}", accepted.join(", "))))
}

fn unknown_option(option: &str, accepted: &[&str]) -> CommandError {
    CommandError::option(format!("unknown option: {}, expected one of: {}", option, accepted.join(", ")))
}
