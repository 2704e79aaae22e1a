use crate::chess::core::{Move, Square};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Show,
    Moves { square: Square },
    Select { square: Square },
    Move { mv: Move },
    Undo,
    Reset,
    Status,
    Quit,
    Unknown(String),
}

fn parse_square(input: &str, parts: &[&str]) -> Result<Square, Command> {
    match parts {
        [_, square] => Square::try_from(*square).map_err(|_| Command::Unknown(input.to_string())),
        _ => Err(Command::Unknown(input.to_string())),
    }
}

/// Accepts both "e2e4" and "e2 e4".
fn parse_move(input: &str, parts: &[&str]) -> Command {
    let mv = match parts {
        [_, mv] => Move::from_uci(mv).ok(),
        [_, from, to] => match (Square::try_from(*from), Square::try_from(*to)) {
            (Ok(from), Ok(to)) => Some(Move::new(from, to)),
            _ => None,
        },
        _ => None,
    };
    mv.map_or_else(|| Command::Unknown(input.to_string()), |mv| Command::Move { mv })
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.to_string());
        }

        match parts[0] {
            "show" | "d" if parts.len() == 1 => Self::Show,
            "moves" => {
                parse_square(input, &parts).map_or_else(|e| e, |square| Self::Moves { square })
            },
            "select" => {
                parse_square(input, &parts).map_or_else(|e| e, |square| Self::Select { square })
            },
            "move" => parse_move(input, &parts),
            "undo" if parts.len() == 1 => Self::Undo,
            "reset" if parts.len() == 1 => Self::Reset,
            "status" if parts.len() == 1 => Self::Status,
            "quit" => Self::Quit,
            _ => Self::Unknown(input.to_string()),
        }
    }
}
