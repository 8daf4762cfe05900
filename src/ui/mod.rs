//! Interactive calculator
//!
//! A readline loop that feeds parsed commands into the session dispatcher.
//! The prompt reflects the current screen.

pub mod readline;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;

use crate::dispatcher::{dispatch_session_command, OutputOptions, SessionFlow};
use etfcalc::commands::parse_command;
use etfcalc::session::{Screen, Session};

fn prompt(session: &Session) -> String {
    match (session.screen(), session.regime()) {
        (Screen::RegimeSelect, _) | (_, None) => "etfcalc> ".to_string(),
        (_, Some(regime)) => format!("etfcalc[{}]> ", regime.as_str()),
    }
}

/// Launch the interactive calculator REPL.
pub fn launch_session(mut session: Session, opts: OutputOptions) -> Result<()> {
    println!("{}", "etfcalc - Interactive Mode".bold());
    println!(
        "Type {} for help, {} to exit\n",
        "/help".cyan(),
        "/exit".cyan()
    );
    if session.screen() == Screen::RegimeSelect {
        println!("Choose a regime: intraday or delivery");
    }

    let mut rl = readline::Readline::new()?;
    let mut stdout = std::io::stdout();

    loop {
        match rl.readline(&prompt(&session)) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Ok(cmd) => match dispatch_session_command(cmd, &mut session, opts, &mut stdout)
                    {
                        Ok(SessionFlow::Continue) => {}
                        Ok(SessionFlow::Exit) => {
                            println!("Goodbye!");
                            break;
                        }
                        Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                    },
                    Err(e) => {
                        eprintln!("{} {}", "Parse error:".yellow().bold(), e.message);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}
