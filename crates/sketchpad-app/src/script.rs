//! Input scripts: one pointer or toolbar action per line.
//!
//! ```text
//! # draw a line, then select it
//! tool line
//! down 10 10
//! move 50 50
//! up 100 100
//! select single
//! click 55 55
//! save scene.xml
//! ```

use sketchpad_core::{CanvasPoint, CornerStyle, SelectionMode, ToolKind};
use thiserror::Error;

/// Script parse errors. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {command} expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },
    #[error("line {line}: invalid {expected} {value:?}")]
    InvalidArgument {
        line: usize,
        value: String,
        expected: &'static str,
    },
    #[error("line {line}: unexpected trailing input {rest:?}")]
    TrailingInput { line: usize, rest: String },
}

/// A single scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Arm the line or rectangle tool.
    Tool(ToolKind),
    /// Corner style for new rectangles.
    Corner(CornerStyle),
    /// Arm selection with the given mode.
    Select(SelectionMode),
    Down(CanvasPoint),
    Move(CanvasPoint),
    Up(CanvasPoint),
    /// Selection click regardless of the armed tool.
    Click(CanvasPoint),
    Group,
    Ungroup,
    Save(String),
    Load(String),
    /// Print the top-level scene.
    List,
}

struct Args<'a> {
    line: usize,
    command: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, expected: &'static str) -> Result<&'a str, ScriptError> {
        self.words.next().ok_or_else(|| ScriptError::MissingArgument {
            line: self.line,
            command: self.command.to_string(),
            expected,
        })
    }

    fn coord(&mut self) -> Result<i32, ScriptError> {
        let word = self.word("x and y coordinates")?;
        word.parse().map_err(|_| ScriptError::InvalidArgument {
            line: self.line,
            value: word.to_string(),
            expected: "coordinate",
        })
    }

    fn point(&mut self) -> Result<CanvasPoint, ScriptError> {
        let x = self.coord()?;
        let y = self.coord()?;
        Ok(CanvasPoint::new(x, y))
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        let rest: Vec<&str> = self.words.by_ref().collect();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(ScriptError::TrailingInput {
                line: self.line,
                rest: rest.join(" "),
            })
        }
    }

    fn invalid(&self, value: &str, expected: &'static str) -> ScriptError {
        ScriptError::InvalidArgument {
            line: self.line,
            value: value.to_string(),
            expected,
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let mut args = Args { line, command, words };

    let parsed = match command {
        "tool" => match args.word("line or rectangle")? {
            "line" => Command::Tool(ToolKind::Line),
            "rectangle" => Command::Tool(ToolKind::Rectangle),
            other => return Err(args.invalid(other, "tool")),
        },
        "corner" => match args.word("rounded or square")? {
            "rounded" => Command::Corner(CornerStyle::Rounded),
            "square" => Command::Corner(CornerStyle::Square),
            other => return Err(args.invalid(other, "corner style")),
        },
        "select" => match args.word("single or multi")? {
            "single" => Command::Select(SelectionMode::Single),
            "multi" => Command::Select(SelectionMode::Multi),
            other => return Err(args.invalid(other, "selection mode")),
        },
        "down" => Command::Down(args.point()?),
        "move" => Command::Move(args.point()?),
        "up" => Command::Up(args.point()?),
        "click" => Command::Click(args.point()?),
        "group" => Command::Group,
        "ungroup" => Command::Ungroup,
        "save" => Command::Save(args.word("a file path")?.to_string()),
        "load" => Command::Load(args.word("a file path")?.to_string()),
        "list" => Command::List,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    args.finish()?;
    Ok(Some(parsed))
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}
