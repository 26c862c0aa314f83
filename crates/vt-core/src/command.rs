//! Slash-command parsing.
//!
//! Maps one line of chat text to a structured [`Command`]. Parsing is pure
//! and never touches the store; whether a `/done 3` actually refers to an
//! existing task is decided at execution time against the current list.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed chat command.
///
/// Positions in `Done`/`Delete` are 1-based indexes into the sender's own
/// task list as `/list` would show it right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Command {
    Start,
    Help,
    Add { text: String },
    List,
    Done { position: usize },
    Delete { position: usize },
    Unknown { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("task text required")]
    EmptyText,

    #[error("'{0}' is not a task number")]
    InvalidPosition(String),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a single line of chat input.
///
/// Keywords are case-sensitive. A command keyword without its required
/// argument (bare `/add`, `/done`, `/delete`) is not a partial command but
/// plain unrecognized input, matching how the bot has always dispatched.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    match line {
        "/start" => return Ok(Command::Start),
        "/help" => return Ok(Command::Help),
        "/list" => return Ok(Command::List),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("/add ") {
        let text = rest.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyText);
        }
        return Ok(Command::Add {
            text: text.to_string(),
        });
    }

    if let Some(rest) = line.strip_prefix("/done ") {
        return parse_position(rest).map(|position| Command::Done { position });
    }

    if let Some(rest) = line.strip_prefix("/delete ") {
        return parse_position(rest).map(|position| Command::Delete { position });
    }

    Ok(Command::Unknown {
        raw: line.to_string(),
    })
}

fn parse_position(arg: &str) -> Result<usize, ParseError> {
    let arg = arg.trim();
    arg.parse::<usize>()
        .map_err(|_| ParseError::InvalidPosition(arg.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keywords() {
        assert_eq!(parse("/start"), Ok(Command::Start));
        assert_eq!(parse("/help"), Ok(Command::Help));
        assert_eq!(parse("/list"), Ok(Command::List));
    }

    #[test]
    fn add_trims_its_argument() {
        assert_eq!(
            parse("/add buy milk"),
            Ok(Command::Add {
                text: "buy milk".into()
            })
        );
        assert_eq!(
            parse("/add   spaced out  "),
            Ok(Command::Add {
                text: "spaced out".into()
            })
        );
    }

    #[test]
    fn add_with_only_whitespace_is_rejected() {
        assert_eq!(parse("/add "), Err(ParseError::EmptyText));
        assert_eq!(parse("/add     "), Err(ParseError::EmptyText));
    }

    #[test]
    fn done_and_delete_take_positions() {
        assert_eq!(parse("/done 2"), Ok(Command::Done { position: 2 }));
        assert_eq!(parse("/delete 10"), Ok(Command::Delete { position: 10 }));
        // 0 parses; the executor decides it is out of range.
        assert_eq!(parse("/done 0"), Ok(Command::Done { position: 0 }));
    }

    #[test]
    fn non_integer_positions_are_invalid() {
        assert_eq!(
            parse("/done two"),
            Err(ParseError::InvalidPosition("two".into()))
        );
        assert_eq!(
            parse("/delete -1"),
            Err(ParseError::InvalidPosition("-1".into()))
        );
        assert_eq!(
            parse("/done 1.5"),
            Err(ParseError::InvalidPosition("1.5".into()))
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            parse("/Start"),
            Ok(Command::Unknown {
                raw: "/Start".into()
            })
        );
        assert_eq!(
            parse("/LIST"),
            Ok(Command::Unknown {
                raw: "/LIST".into()
            })
        );
    }

    #[test]
    fn bare_argument_commands_fall_through_to_unknown() {
        for raw in ["/add", "/done", "/delete"] {
            assert_eq!(parse(raw), Ok(Command::Unknown { raw: raw.into() }));
        }
    }

    #[test]
    fn free_text_is_unknown() {
        assert_eq!(
            parse("hello bot"),
            Ok(Command::Unknown {
                raw: "hello bot".into()
            })
        );
        assert_eq!(parse(""), Ok(Command::Unknown { raw: String::new() }));
    }
}
