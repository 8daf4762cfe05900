use anyhow::{anyhow, Result};
use std::str::FromStr;

use crate::cli::{Commands, TradeArgs};
use etfcalc::config::Config;
use etfcalc::fees::{Regime, TradeForm};

/// What the binary was asked to do, with config defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Calculate { regime: Regime, form: TradeForm },
    Compare { form: TradeForm },
    Regimes,
    Interactive { regime: Option<Regime> },
}

/// Convert the parsed clap command into a [`Request`].
///
/// No subcommand launches the interactive calculator. An unknown regime name
/// is an error; blank trade fields are not, they surface later as
/// validation failures of the calculation itself.
pub fn to_request(command: Option<&Commands>, config: &Config) -> Result<Request> {
    match command {
        None => Ok(Request::Interactive {
            regime: config.default_regime,
        }),

        Some(Commands::Calc { regime, trade }) => {
            let regime = match regime.as_deref() {
                Some(name) => parse_regime(name)?,
                None => config.regime_or_default(),
            };
            Ok(Request::Calculate {
                regime,
                form: trade.to_form(),
            })
        }

        Some(Commands::Compare { trade }) => Ok(Request::Compare {
            form: trade.to_form(),
        }),

        Some(Commands::Regimes) => Ok(Request::Regimes),

        Some(Commands::Interactive { regime }) => {
            let regime = match regime.as_deref() {
                Some(name) => Some(parse_regime(name)?),
                None => config.default_regime,
            };
            Ok(Request::Interactive { regime })
        }
    }
}

fn parse_regime(name: &str) -> Result<Regime> {
    Regime::from_str(name)
        .map_err(|_| anyhow!("Unknown regime '{}'. Use: intraday, delivery", name))
}

impl TradeArgs {
    pub fn to_form(&self) -> TradeForm {
        TradeForm::new(
            self.buy.clone().unwrap_or_default(),
            self.sell.clone().unwrap_or_default(),
            self.qty.clone().unwrap_or_default(),
        )
    }
}
