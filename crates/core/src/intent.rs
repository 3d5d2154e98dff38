//! User intents and their text form
//!
//! The view dispatches these to the session controller. Interactive shells
//! type them as short commands (`search red shirt`, `next`, `size 10`,
//! `sort price`); [`parse_command`] turns such a line into a [`Command`].

use serde::{Deserialize, Serialize};

use crate::pagination::{PageSize, PageSizeError};
use crate::sort::{SortField, UnknownSortField};

/// Single navigation step
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageDelta {
    Previous,
    Next,
}

/// Something the user asked the listing to do
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum Intent {
    Search(String),
    PageChange(PageDelta),
    PageSizeChange(PageSize),
    SortToggle(SortField),
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IntentError {
    #[error("Unknown command: {0}. Type 'help' for the list of commands")]
    UnknownCommand(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(String),

    #[error("Unexpected argument for '{0}'")]
    UnexpectedArgument(String),

    #[error("Unbalanced quotes in: {0}")]
    UnbalancedQuotes(String),

    #[error(transparent)]
    PageSize(#[from] PageSizeError),

    #[error(transparent)]
    SortField(#[from] UnknownSortField),
}

/// Usage lines for the interactive shell
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("search <keyword>", "Filter by title (no keyword shows everything)"),
    ("next | n", "Go to the next page"),
    ("prev | p", "Go to the previous page"),
    ("size <5|10|20>", "Change the number of products per page"),
    ("sort <title|price>", "Sort by a column; repeat to flip direction"),
    ("help | ?", "Show this help"),
    ("quit | q", "Leave the listing"),
];

/// Parse one line of interactive input
///
/// Words are split with shell quoting rules, so `search "red shirt"` and
/// `search red shirt` both search for `red shirt`. A blank line yields
/// `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, IntentError> {
    let words = shlex::split(line).ok_or_else(|| IntentError::UnbalancedQuotes(line.to_string()))?;

    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "search" | "s" | "/" => Command::Intent(Intent::Search(args.join(" "))),
        "next" | "n" => {
            no_args(name, args)?;
            Command::Intent(Intent::PageChange(PageDelta::Next))
        }
        "prev" | "previous" | "p" => {
            no_args(name, args)?;
            Command::Intent(Intent::PageChange(PageDelta::Previous))
        }
        "size" | "limit" => {
            let size = single_arg(name, args)?.parse::<PageSize>()?;
            Command::Intent(Intent::PageSizeChange(size))
        }
        "sort" => {
            let field = single_arg(name, args)?.parse::<SortField>()?;
            Command::Intent(Intent::SortToggle(field))
        }
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(IntentError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn no_args(name: &str, args: &[String]) -> Result<(), IntentError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(IntentError::UnexpectedArgument(name.to_string()))
    }
}

fn single_arg<'a>(name: &str, args: &'a [String]) -> Result<&'a str, IntentError> {
    match args {
        [] => Err(IntentError::MissingArgument(name.to_string())),
        [arg] => Ok(arg.as_str()),
        _ => Err(IntentError::UnexpectedArgument(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(line: &str) -> Intent {
        match parse_command(line) {
            Ok(Some(Command::Intent(intent))) => intent,
            other => panic!("expected an intent for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(intent("search shirt"), Intent::Search("shirt".to_string()));
        assert_eq!(
            intent("search red shirt"),
            Intent::Search("red shirt".to_string())
        );
        assert_eq!(
            intent(r#"s "red  shirt""#),
            Intent::Search("red  shirt".to_string())
        );
        assert_eq!(intent("/ chair"), Intent::Search("chair".to_string()));
    }

    #[test]
    fn test_parse_search_without_keyword_clears() {
        assert_eq!(intent("search"), Intent::Search(String::new()));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(intent("next"), Intent::PageChange(PageDelta::Next));
        assert_eq!(intent("N"), Intent::PageChange(PageDelta::Next));
        assert_eq!(intent("prev"), Intent::PageChange(PageDelta::Previous));
        assert_eq!(intent("p"), Intent::PageChange(PageDelta::Previous));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(
            intent("size 10"),
            Intent::PageSizeChange(PageSize::try_from(10).unwrap())
        );
        assert_eq!(
            parse_command("size 7"),
            Err(IntentError::PageSize(PageSizeError::NotAllowed(7)))
        );
        assert_eq!(
            parse_command("size"),
            Err(IntentError::MissingArgument("size".to_string()))
        );
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(intent("sort price"), Intent::SortToggle(SortField::Price));
        assert_eq!(intent("sort Title"), Intent::SortToggle(SortField::Title));
        assert!(matches!(
            parse_command("sort rating"),
            Err(IntentError::SortField(_))
        ));
    }

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(parse_command("help"), Ok(Some(Command::Help)));
        assert_eq!(parse_command("?"), Ok(Some(Command::Help)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("dance"),
            Err(IntentError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            parse_command("next 2"),
            Err(IntentError::UnexpectedArgument("next".to_string()))
        );
        assert!(matches!(
            parse_command(r#"search "open"#),
            Err(IntentError::UnbalancedQuotes(_))
        ));
    }

    #[test]
    fn test_intent_json_shape() {
        let json = serde_json::to_string(&Intent::SortToggle(SortField::Price)).unwrap();
        assert_eq!(json, r#"{"intent":"sort_toggle","value":"price"}"#);

        let parsed: Intent =
            serde_json::from_str(r#"{"intent":"page_size_change","value":10}"#).unwrap();
        assert_eq!(
            parsed,
            Intent::PageSizeChange(PageSize::try_from(10).unwrap())
        );
    }
}
