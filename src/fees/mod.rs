// Fee module - brokerage, statutory charges and income tax for an ETF round trip

pub mod breakdown;
pub mod input;
pub mod schedule;

pub use breakdown::{calculate, compute, CostBreakdown};
pub use input::{Field, TradeForm, TradeInput, MAX_TRADE_VALUE};
pub use schedule::{Brokerage, FeeSchedule, GstBase, Levy, LevyBase, Regime};
