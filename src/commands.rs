//! Interactive command parsing
//!
//! Turns a line typed in the interactive session into a [`Command`]. Both
//! plain (`calc 100 105 10`) and slash (`/calc 100 105 10`) forms are
//! accepted.

use std::str::FromStr;

use crate::fees::{Field, Regime};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose the fee regime: `regime <intraday|delivery>`
    SelectRegime { regime: Regime },
    /// Fill one form field: `set <buy|sell|qty> <value>`
    Set { field: Field, value: String },
    /// Run the calculator: `calc` or `calc <buy> <sell> <qty>`
    Calculate { values: Option<[String; 3]> },
    /// Show the current form and last result: `show`
    Show,
    /// Clear inputs and result: `reset`
    Reset,
    /// Back to regime selection: `back`
    Back,
    /// Show both fee schedules: `regimes`
    Regimes,
    /// Show help
    Help,
    /// Exit/quit
    Exit,
}

/// Error type for command parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParseError {
    pub message: String,
}

impl CommandParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a command string into a Command enum
pub fn parse_command(input: &str) -> Result<Command, CommandParseError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(CommandParseError::new(
            "Empty command. Type `/help` for commands.",
        ));
    }

    // Remove leading slash if present
    let input = input.strip_prefix('/').unwrap_or(input);

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandParseError::new("No command provided"))?;
    let args: Vec<&str> = parts.collect();

    match cmd.to_lowercase().as_str() {
        "regime" | "mode" => {
            let name = args.first().ok_or_else(|| {
                CommandParseError::new("regime requires a name. Usage: regime <intraday|delivery>")
            })?;
            let regime = Regime::from_str(name).map_err(|_| {
                CommandParseError::new(format!(
                    "Unknown regime: {}. Use: intraday, delivery",
                    name
                ))
            })?;
            Ok(Command::SelectRegime { regime })
        }
        // Shortcuts for the two regimes
        "intraday" => Ok(Command::SelectRegime {
            regime: Regime::Intraday,
        }),
        "delivery" => Ok(Command::SelectRegime {
            regime: Regime::Delivery,
        }),
        "set" => {
            let usage = "Usage: set <buy|sell|qty> <value>";
            let name = args
                .first()
                .ok_or_else(|| CommandParseError::new(format!("set requires a field. {}", usage)))?;
            let field = Field::from_str(name).map_err(|_| {
                CommandParseError::new(format!("Unknown field: {}. {}", name, usage))
            })?;
            // A missing value clears the field
            let value = args.get(1).map(|v| v.to_string()).unwrap_or_default();
            if args.len() > 2 {
                return Err(CommandParseError::new(format!(
                    "set takes a single value. {}",
                    usage
                )));
            }
            Ok(Command::Set { field, value })
        }
        "buy" | "sell" | "qty" | "quantity" => {
            // `buy 100` is shorthand for `set buy 100`
            let field = Field::from_str(cmd)
                .map_err(|_| CommandParseError::new(format!("Unknown field: {}", cmd)))?;
            let value = args.first().map(|v| v.to_string()).unwrap_or_default();
            Ok(Command::Set { field, value })
        }
        "calc" | "calculate" => match args.as_slice() {
            [] => Ok(Command::Calculate { values: None }),
            [buy, sell, qty] => Ok(Command::Calculate {
                values: Some([buy.to_string(), sell.to_string(), qty.to_string()]),
            }),
            _ => Err(CommandParseError::new(
                "calc takes no arguments or exactly three. Usage: calc [<buy> <sell> <qty>]",
            )),
        },
        "show" => Ok(Command::Show),
        "reset" | "clear" => Ok(Command::Reset),
        "back" => Ok(Command::Back),
        "regimes" => Ok(Command::Regimes),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        other => Err(CommandParseError::new(format!(
            "Unknown command: {}. Type `/help` for commands.",
            other
        ))),
    }
}
