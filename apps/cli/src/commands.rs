//! REPL command parsing.

use std::str::FromStr;

use easyfin_core::controller::Section;
use easyfin_core::portfolio::OrderSide;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  login <email> <password>              sign in
  register <email> <password> <name>    create an account
  logout                                sign out
  show <section> | <section>            dashboard, trading, portfolio, instruments, history
  buy <ticker> <quantity>               buy at the current price
  sell <ticker> <quantity>              sell from a held position
  preview <buy|sell> <ticker> <qty>     estimate an order without sending it
  prices                                move market prices and reload
  help                                  show this list
  quit                                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    Show(Section),
    Buy {
        ticker: String,
        quantity: i64,
    },
    Sell {
        ticker: String,
        quantity: i64,
    },
    Preview {
        side: OrderSide,
        ticker: String,
        quantity: i64,
    },
    Prices,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// A quantity that is not a number is treated like an empty form field and
/// left to the order checks.
fn quantity(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

fn side(raw: &str) -> Option<OrderSide> {
    match raw.to_ascii_lowercase().as_str() {
        "buy" | "acquisto" => Some(OrderSide::Buy),
        "sell" | "vendita" => Some(OrderSide::Sell),
        _ => None,
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = words.split_first() else {
            return Ok(Command::Empty);
        };

        match (keyword.to_ascii_lowercase().as_str(), args) {
            ("login", [email, password]) => Ok(Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            }),
            ("login", _) => Err(CommandError::Usage("login <email> <password>")),
            ("register", [email, password, name @ ..]) if !name.is_empty() => {
                Ok(Command::Register {
                    name: name.join(" "),
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            ("register", _) => Err(CommandError::Usage("register <email> <password> <name>")),
            ("logout", []) => Ok(Command::Logout),
            ("show", [section]) => section
                .parse()
                .map(Command::Show)
                .map_err(|_| CommandError::Unknown(section.to_string())),
            ("show", _) => Err(CommandError::Usage("show <section>")),
            ("buy", [ticker, qty]) => Ok(Command::Buy {
                ticker: ticker.to_uppercase(),
                quantity: quantity(qty),
            }),
            ("buy", _) => Err(CommandError::Usage("buy <ticker> <quantity>")),
            ("sell", [ticker, qty]) => Ok(Command::Sell {
                ticker: ticker.to_uppercase(),
                quantity: quantity(qty),
            }),
            ("sell", _) => Err(CommandError::Usage("sell <ticker> <quantity>")),
            ("preview", [raw_side, ticker, qty]) => match side(raw_side) {
                Some(side) => Ok(Command::Preview {
                    side,
                    ticker: ticker.to_uppercase(),
                    quantity: quantity(qty),
                }),
                None => Err(CommandError::Usage("preview <buy|sell> <ticker> <quantity>")),
            },
            ("preview", _) => Err(CommandError::Usage("preview <buy|sell> <ticker> <quantity>")),
            ("prices", []) => Ok(Command::Prices),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", _) => Ok(Command::Quit),
            (other, []) => other
                .parse()
                .map(Command::Show)
                .map_err(|_| CommandError::Unknown(keyword.to_string())),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}
