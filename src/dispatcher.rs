//! Command dispatcher that routes both one-shot CLI requests and interactive
//! session commands to the appropriate handlers.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;

use crate::cli::formatters;
use crate::cli::help::{render_help, RenderOpts};
use crate::cli::runner::Request;
use crate::cli::Cli;
use crate::ui;
use etfcalc::commands::Command;
use etfcalc::config::Config;
use etfcalc::error::{CalcError, SessionError};
use etfcalc::fees::{self, compute, CostBreakdown, Field, Regime, TradeForm};
use etfcalc::session::{Screen, Session};

/// Exit code for input rejected by validation
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Output preferences after merging CLI flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub json: bool,
    pub color: bool,
}

impl OutputOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            json: cli.json || config.json,
            color: config.color && !cli.no_color,
        }
    }
}

/// Route a request to its handler
pub fn dispatch(request: Request, opts: OutputOptions) -> Result<ExitCode> {
    match request {
        Request::Calculate { regime, form } => dispatch_calculate(regime, &form, opts),
        Request::Compare { form } => dispatch_compare(&form, opts),
        Request::Regimes => {
            if opts.json {
                println!("{}", formatters::format_schedules_json()?);
            } else {
                println!("{}", formatters::format_schedules_table());
            }
            Ok(ExitCode::SUCCESS)
        }
        Request::Interactive { regime } => {
            let session = match regime {
                Some(regime) => Session::with_regime(regime),
                None => Session::new(),
            };
            ui::launch_session(session, opts)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn dispatch_calculate(regime: Regime, form: &TradeForm, opts: OutputOptions) -> Result<ExitCode> {
    info!("Calculating {} round trip", regime.as_str());

    match fees::calculate(regime, form) {
        Ok(breakdown) => {
            print_breakdown(&breakdown, opts)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_calc_error(&err, opts)),
    }
}

fn dispatch_compare(form: &TradeForm, opts: OutputOptions) -> Result<ExitCode> {
    info!("Comparing regimes for one round trip");

    // Validation does not depend on the regime, so parse once
    let input = match form.parse(Regime::Intraday) {
        Ok(input) => input,
        Err(err) => return Ok(report_calc_error(&err, opts)),
    };

    let breakdowns: Vec<CostBreakdown> = Regime::ALL
        .iter()
        .map(|regime| compute(&input.with_regime(*regime)))
        .collect();

    if opts.json {
        println!("{}", formatters::format_comparison_json(&breakdowns)?);
    } else {
        println!("{}", formatters::format_comparison_table(&breakdowns));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_breakdown(breakdown: &CostBreakdown, opts: OutputOptions) -> Result<()> {
    if opts.json {
        println!("{}", formatters::format_breakdown_json(breakdown)?);
    } else {
        println!("{}", formatters::format_breakdown_table(breakdown));
    }
    Ok(())
}

fn report_calc_error(err: &CalcError, opts: OutputOptions) -> ExitCode {
    info!("Rejected input: {}", err);
    if opts.json {
        println!("{}", formatters::format_error_json(err));
    } else {
        eprintln!("{}", formatters::format_calc_error(err));
    }
    ExitCode::from(EXIT_INVALID_INPUT)
}

/// Whether the interactive loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Exit,
}

/// Apply one interactive command to the session, writing feedback to `out`
pub fn dispatch_session_command<W: Write>(
    command: Command,
    session: &mut Session,
    opts: OutputOptions,
    out: &mut W,
) -> Result<SessionFlow> {
    match command {
        Command::SelectRegime { regime } => {
            session.select_regime(regime);
            writeln!(
                out,
                "{} {} regime selected. Enter buy, sell and qty, then calc.",
                "✓".green().bold(),
                regime.display_name()
            )?;
        }
        Command::Set { field, value } => match session.set_field(field, value) {
            Ok(()) => write_form(out, session)?,
            Err(err) => write_session_error(out, &err, opts)?,
        },
        Command::Calculate { values } => {
            if let Some([buy, sell, qty]) = values {
                let filled = [(Field::BuyPrice, buy), (Field::SellPrice, sell), (Field::Quantity, qty)]
                    .into_iter()
                    .try_for_each(|(field, value)| session.set_field(field, value));
                if let Err(err) = filled {
                    write_session_error(out, &err, opts)?;
                    return Ok(SessionFlow::Continue);
                }
            }
            match session.calculate() {
                Ok(breakdown) => write_breakdown(out, breakdown, opts)?,
                Err(err) => write_session_error(out, &err, opts)?,
            }
        }
        Command::Show => match session.screen() {
            Screen::RegimeSelect => {
                writeln!(out, "No regime selected. Use: regime <intraday|delivery>")?
            }
            Screen::Calculator => write_form(out, session)?,
            Screen::Results => {
                write_form(out, session)?;
                if let Some(breakdown) = session.result() {
                    write_breakdown(out, breakdown, opts)?;
                }
            }
        },
        Command::Reset => {
            session.reset();
            writeln!(out, "{} Form cleared", "✓".green().bold())?;
        }
        Command::Back => {
            session.back();
            writeln!(out, "Choose a regime: intraday or delivery")?;
        }
        Command::Regimes => {
            if opts.json {
                writeln!(out, "{}", formatters::format_schedules_json()?)?;
            } else {
                writeln!(out, "{}", formatters::format_schedules_table())?;
            }
        }
        Command::Help => render_help(&mut *out, &RenderOpts::default())?,
        Command::Exit => return Ok(SessionFlow::Exit),
    }

    Ok(SessionFlow::Continue)
}

fn write_form<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    let regime = session
        .regime()
        .map(|r| r.display_name())
        .unwrap_or("none");
    writeln!(out, "{} {}", "Regime:".bold(), regime)?;
    for field in Field::ALL {
        let value = session.form().get(field);
        let shown = if value.trim().is_empty() {
            "(empty)".bright_black().to_string()
        } else {
            value.to_string()
        };
        writeln!(out, "  {:<12} {}", field.label(), shown)?;
    }
    Ok(())
}

fn write_breakdown<W: Write>(
    out: &mut W,
    breakdown: &CostBreakdown,
    opts: OutputOptions,
) -> Result<()> {
    if opts.json {
        writeln!(out, "{}", formatters::format_breakdown_json(breakdown)?)?;
    } else {
        writeln!(out, "{}", formatters::format_breakdown_table(breakdown))?;
    }
    Ok(())
}

fn write_session_error<W: Write>(
    out: &mut W,
    err: &SessionError,
    opts: OutputOptions,
) -> Result<()> {
    match err {
        SessionError::Calc(calc) if opts.json => {
            writeln!(out, "{}", formatters::format_error_json(calc))?
        }
        SessionError::Calc(calc) => writeln!(out, "{}", formatters::format_calc_error(calc))?,
        SessionError::NoRegimeSelected => {
            writeln!(out, "{} {}", "Error:".red().bold(), err)?
        }
    }
    Ok(())
}
