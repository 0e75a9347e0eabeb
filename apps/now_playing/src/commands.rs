//! Interactive commands typed on stdin, mapped onto presentation events.

use client_core::{ListingKind, UiEvent};
use shared::domain::GenreId;

pub const HELP: &str = "commands: rating <0-10> | genre <id> | reset | listing <gallery|list> | filters | show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();

    match (verb.to_ascii_lowercase().as_str(), arg) {
        ("rating", Some(raw)) => raw
            .parse::<f64>()
            .map(|value| Command::Event(UiEvent::RatingChanged(value)))
            .map_err(|_| format!("rating must be a number, got '{raw}'")),
        ("genre", Some(raw)) => raw
            .parse::<i64>()
            .map(|id| Command::Event(UiEvent::GenreToggled(GenreId(id))))
            .map_err(|_| format!("genre must be a numeric id, got '{raw}'")),
        ("listing", Some(raw)) => raw
            .parse::<ListingKind>()
            .map(|kind| Command::Event(UiEvent::ListingTypeChanged(kind))),
        ("reset", None) => Ok(Command::Event(UiEvent::FiltersReset)),
        ("filters", None) => Ok(Command::Event(UiEvent::FiltersVisibilityToggled)),
        ("show", None) => Ok(Command::Show),
        ("help" | "?", None) => Ok(Command::Help),
        ("quit" | "exit" | "q", None) => Ok(Command::Quit),
        (other, _) => Err(format!("unrecognized command '{other}'; {HELP}")),
    }
}
