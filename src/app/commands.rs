//! Text command parsing for the line-oriented driver.
//!
//! Each input line maps to zero or more [`Event`]s. `search <text>` is two
//! events (update the draft, then apply it) so the draft and the applied term
//! stay separate, as they are for a search box.
//!
//! # Commands
//!
//! | Command               | Events                               |
//! |-----------------------|--------------------------------------|
//! | `search <text>`       | `SearchInput`, `SubmitSearch`        |
//! | `type <text>`         | `SearchInput`                        |
//! | `clear`               | `ClearSearch`                        |
//! | `clear-all`           | `ClearAll`                           |
//! | `category <name\|->`  | `SelectCategory`                     |
//! | `tag <name\|->`       | `SelectTag`                          |
//! | `sort <field,dir>`    | `SelectSort`                         |
//! | `next` / `prev`       | `NextPage` / `PreviousPage`          |
//! | `magazine`, `dashboard`, `chat`, `map` | view switches       |
//! | `chat <text>`         | `ShowChat`, `SendChat`               |
//! | `refresh`             | `RefreshDashboard`                   |
//! | `say <text>`          | `SendChat`                           |
//! | `quit`                | `Quit`                               |

use thiserror::Error;

use super::handler::Event;
use crate::domain::SortKey;

/// Why a line could not be turned into events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

/// Parses one input line. Blank lines yield no events.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands, missing arguments and
/// unparseable sort keys.
pub fn parse_command(line: &str) -> Result<Vec<Event>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(vec![]);
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let required = |name: &'static str| {
        if argument.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(argument.to_string())
        }
    };
    // `-` or nothing selects "all".
    let selection = || (!argument.is_empty() && argument != "-").then(|| argument.to_string());

    let events = match command.to_ascii_lowercase().as_str() {
        "search" | "/" => vec![Event::SearchInput(argument.to_string()), Event::SubmitSearch],
        "type" => vec![Event::SearchInput(argument.to_string())],
        "clear" => vec![Event::ClearSearch],
        "clear-all" | "reset" => vec![Event::ClearAll],
        "category" | "cat" => vec![Event::SelectCategory(selection())],
        "tag" => vec![Event::SelectTag(selection())],
        "sort" => {
            let key: SortKey = required("sort")?
                .parse()
                .map_err(|e: crate::domain::AtlasError| CommandError::InvalidArgument(e.to_string()))?;
            vec![Event::SelectSort(key)]
        }
        "next" | "n" => vec![Event::NextPage],
        "prev" | "p" => vec![Event::PreviousPage],
        "magazine" | "m" => vec![Event::ShowMagazine],
        "dashboard" | "d" => vec![Event::ShowDashboard],
        "chat" | "c" if argument.is_empty() => vec![Event::ShowChat],
        "chat" | "c" => vec![Event::ShowChat, Event::SendChat(argument.to_string())],
        "map" => vec![Event::ShowMap],
        "refresh" | "r" => vec![Event::RefreshDashboard],
        "say" => vec![Event::SendChat(required("say")?)],
        "quit" | "q" | "exit" => vec![Event::Quit],
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(events)
}
