use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::input::{TradeForm, TradeInput};
use super::schedule::{GstBase, Regime};
use crate::error::CalcError;
use crate::utils::{round_money, round_percent};

/// Full cost and tax breakdown of one round trip.
///
/// All values are kept unrounded; use [`CostBreakdown::rounded`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub regime: Regime,
    pub buy_amount: Decimal,
    pub sell_amount: Decimal,
    pub gross_profit: Decimal,
    pub buy_brokerage: Decimal,
    pub sell_brokerage: Decimal,
    pub total_brokerage: Decimal,
    pub stt: Decimal,
    pub stamp_duty: Decimal,
    pub exchange_and_reg_fees: Decimal,
    /// Part of the GST base only; not included in `total_costs`
    pub sebi_fee: Decimal,
    pub dp_charges: Decimal,
    pub gst: Decimal,
    pub total_costs: Decimal,
    pub net_profit_after_costs: Decimal,
    pub income_tax_rate: Decimal,
    pub income_tax: Decimal,
    pub net_profit_after_tax: Decimal,
    /// Gross profit as a percentage of the buy value; `None` when the buy value is zero
    pub profit_margin: Option<Decimal>,
    /// Total costs as a percentage of the buy value; `None` when the buy value is zero
    pub cost_percentage: Option<Decimal>,
}

/// Compute the breakdown for already validated inputs
pub fn compute(input: &TradeInput) -> CostBreakdown {
    let regime = input.regime();
    let schedule = regime.schedule();

    let buy_amount = input.buy_amount();
    let sell_amount = input.sell_amount();
    let gross_profit = sell_amount - buy_amount;

    let buy_brokerage = schedule.brokerage.per_order(buy_amount);
    let sell_brokerage = schedule.brokerage.per_order(sell_amount);
    let total_brokerage = buy_brokerage + sell_brokerage;

    let stt = schedule.stt.apply(buy_amount, sell_amount);
    let stamp_duty = schedule.stamp_duty.apply(buy_amount, sell_amount);
    let exchange_and_reg_fees = schedule.exchange_fees.apply(buy_amount, sell_amount);
    let sebi_fee = schedule
        .sebi_fee
        .map(|levy| levy.apply(buy_amount, sell_amount))
        .unwrap_or(Decimal::ZERO);
    let dp_charges = schedule.dp_charges;

    let gst_base = match schedule.gst_base {
        GstBase::BrokerageAndDp => total_brokerage + dp_charges,
        GstBase::ExchangeAndSebi => exchange_and_reg_fees + sebi_fee,
    };
    let gst = gst_base * schedule.gst_rate;

    let total_costs = total_brokerage + stt + stamp_duty + exchange_and_reg_fees + dp_charges + gst;
    let net_profit_after_costs = gross_profit - total_costs;

    let income_tax_rate = schedule.income_tax_rate;
    let income_tax = (net_profit_after_costs * income_tax_rate).max(Decimal::ZERO);
    let net_profit_after_tax = net_profit_after_costs - income_tax;

    let hundred = Decimal::ONE_HUNDRED;
    // Undefined when the buy value underflows to zero or the ratio leaves the decimal range
    let percent_of_buy = |value: Decimal| {
        value
            .checked_div(buy_amount)
            .and_then(|ratio| ratio.checked_mul(hundred))
    };
    let profit_margin = percent_of_buy(gross_profit);
    let cost_percentage = percent_of_buy(total_costs);

    debug!(
        regime = regime.as_str(),
        %buy_amount,
        %sell_amount,
        %total_costs,
        %net_profit_after_tax,
        "computed round-trip breakdown"
    );

    CostBreakdown {
        regime,
        buy_amount,
        sell_amount,
        gross_profit,
        buy_brokerage,
        sell_brokerage,
        total_brokerage,
        stt,
        stamp_duty,
        exchange_and_reg_fees,
        sebi_fee,
        dp_charges,
        gst,
        total_costs,
        net_profit_after_costs,
        income_tax_rate,
        income_tax,
        net_profit_after_tax,
        profit_margin,
        cost_percentage,
    }
}

/// Validate a raw form and compute its breakdown
pub fn calculate(regime: Regime, form: &TradeForm) -> Result<CostBreakdown, CalcError> {
    let input = form.parse(regime)?;
    Ok(compute(&input))
}

impl CostBreakdown {
    /// Copy with every money field and percentage independently rounded to
    /// two decimals. The tax rate is left as is.
    pub fn rounded(&self) -> CostBreakdown {
        CostBreakdown {
            regime: self.regime,
            buy_amount: round_money(self.buy_amount),
            sell_amount: round_money(self.sell_amount),
            gross_profit: round_money(self.gross_profit),
            buy_brokerage: round_money(self.buy_brokerage),
            sell_brokerage: round_money(self.sell_brokerage),
            total_brokerage: round_money(self.total_brokerage),
            stt: round_money(self.stt),
            stamp_duty: round_money(self.stamp_duty),
            exchange_and_reg_fees: round_money(self.exchange_and_reg_fees),
            sebi_fee: round_money(self.sebi_fee),
            dp_charges: round_money(self.dp_charges),
            gst: round_money(self.gst),
            total_costs: round_money(self.total_costs),
            net_profit_after_costs: round_money(self.net_profit_after_costs),
            income_tax_rate: self.income_tax_rate,
            income_tax: round_money(self.income_tax),
            net_profit_after_tax: round_money(self.net_profit_after_tax),
            profit_margin: self.profit_margin.map(round_percent),
            cost_percentage: self.cost_percentage.map(round_percent),
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit_after_tax > Decimal::ZERO
    }
}
