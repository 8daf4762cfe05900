//! Output formatting module for CLI display
//!
//! This module handles all terminal and JSON output, separating the
//! concerns of fee calculation from presentation. Every amount shown here
//! is rounded independently from the unrounded breakdown.

use anyhow::Result;
use colored::Colorize;
use etfcalc::error::CalcError;
use etfcalc::fees::{Brokerage, CostBreakdown, FeeSchedule, GstBase, Levy, LevyBase, Regime};
use etfcalc::utils::{format_currency, format_percent, format_rate};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

/// Format a breakdown for JSON output (values rounded to two decimals)
pub fn format_breakdown_json(breakdown: &CostBreakdown) -> Result<String> {
    Ok(serde_json::to_string_pretty(&breakdown.rounded())?)
}

/// Format several breakdowns of the same trade as a JSON array
pub fn format_comparison_json(breakdowns: &[CostBreakdown]) -> Result<String> {
    let rounded: Vec<CostBreakdown> = breakdowns.iter().map(CostBreakdown::rounded).collect();
    Ok(serde_json::to_string_pretty(&rounded)?)
}

/// Format a validation failure as a JSON error object
pub fn format_error_json(err: &CalcError) -> String {
    let payload = serde_json::json!({
        "error": {
            "kind": err.kind(),
            "field": err.field().map(|f| f.as_str()),
            "message": err.user_message(),
            "detail": err.to_string(),
        }
    });
    serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

fn signed_currency(value: Decimal) -> String {
    let text = format_currency(value);
    if value >= Decimal::ZERO {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format a breakdown for terminal table output
pub fn format_breakdown_table(breakdown: &CostBreakdown) -> String {
    let b = breakdown.rounded();
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {} round trip\n\n",
        "📊".cyan().bold(),
        b.regime.display_name()
    ));

    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "Item")]
        item: &'static str,
        #[tabled(rename = "Amount")]
        amount: String,
    }

    let line = |item, value| LineRow {
        item,
        amount: format_currency(value),
    };

    let rows = vec![
        line("Buy value", b.buy_amount),
        line("Sell value", b.sell_amount),
        LineRow {
            item: "Gross profit",
            amount: signed_currency(b.gross_profit),
        },
        line("Buy brokerage", b.buy_brokerage),
        line("Sell brokerage", b.sell_brokerage),
        line("STT", b.stt),
        line("Stamp duty", b.stamp_duty),
        line("Exchange & reg. fees", b.exchange_and_reg_fees),
        line("DP charges", b.dp_charges),
        line("GST", b.gst),
        line("Total costs", b.total_costs),
    ];

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    output.push_str(&format!("\n\n{} Summary", "━".repeat(48).bright_black()));
    output.push_str(&format!(
        "\n{:<28} {}",
        "Net profit after costs:".bold(),
        signed_currency(b.net_profit_after_costs)
    ));
    output.push_str(&format!(
        "\n{:<28} {}",
        format!("Income tax ({}):", format_rate(b.income_tax_rate)).bold(),
        format_currency(b.income_tax)
    ));
    output.push_str(&format!(
        "\n{:<28} {}",
        "Net profit after tax:".bold(),
        signed_currency(b.net_profit_after_tax)
    ));
    output.push_str(&format!(
        "\n{:<28} {}",
        "Profit margin:".bold(),
        format_percent(b.profit_margin)
    ));
    output.push_str(&format!(
        "\n{:<28} {}\n",
        "Costs / buy value:".bold(),
        format_percent(b.cost_percentage)
    ));

    output
}

/// Format breakdowns of the same trade side by side, one column per regime
pub fn format_comparison_table(breakdowns: &[CostBreakdown]) -> String {
    let rounded: Vec<CostBreakdown> = breakdowns.iter().map(CostBreakdown::rounded).collect();

    let metrics: [(&str, fn(&CostBreakdown) -> String); 8] = [
        ("Gross profit", |b| format_currency(b.gross_profit)),
        ("Total brokerage", |b| format_currency(b.total_brokerage)),
        ("STT", |b| format_currency(b.stt)),
        ("GST", |b| format_currency(b.gst)),
        ("Total costs", |b| format_currency(b.total_costs)),
        ("Income tax", |b| format_currency(b.income_tax)),
        ("Net profit after tax", |b| {
            signed_currency(b.net_profit_after_tax)
        }),
        ("Costs / buy value", |b| format_percent(b.cost_percentage)),
    ];

    let mut builder = Builder::default();
    let mut header = vec!["Item".to_string()];
    header.extend(rounded.iter().map(|b| b.regime.display_name().to_string()));
    builder.push_record(header);

    for (label, render) in metrics {
        let mut record = vec![label.to_string()];
        record.extend(rounded.iter().map(render));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    format!(
        "\n{} Regime comparison\n\n{}\n",
        "📊".cyan().bold(),
        table
    )
}

fn describe_base(base: LevyBase) -> &'static str {
    match base {
        LevyBase::Buy => "buy value",
        LevyBase::Sell => "sell value",
        LevyBase::Turnover => "turnover",
    }
}

fn describe_levy(levy: &Levy) -> String {
    format!("{} of {}", format_rate(levy.rate), describe_base(levy.base))
}

fn describe_schedule(schedule: &FeeSchedule) -> Vec<(&'static str, String)> {
    let brokerage = match schedule.brokerage {
        Brokerage::Free => "none".to_string(),
        Brokerage::Clamped { rate, min, max } => format!(
            "{} per order, min {}, max {}",
            format_rate(rate),
            format_currency(min),
            format_currency(max)
        ),
    };
    let gst_base = match schedule.gst_base {
        GstBase::BrokerageAndDp => "brokerage + DP charges",
        GstBase::ExchangeAndSebi => "exchange fees + SEBI fee",
    };

    let mut lines = vec![
        ("Brokerage", brokerage),
        ("STT", describe_levy(&schedule.stt)),
        ("Stamp duty", describe_levy(&schedule.stamp_duty)),
        ("Exchange & reg. fees", describe_levy(&schedule.exchange_fees)),
    ];
    if let Some(sebi) = &schedule.sebi_fee {
        lines.push(("SEBI fee (GST base only)", describe_levy(sebi)));
    }
    lines.push(("DP charges", format!("{} flat", format_currency(schedule.dp_charges))));
    lines.push((
        "GST",
        format!("{} of {}", format_rate(schedule.gst_rate), gst_base),
    ));
    lines.push(("Income tax", format_rate(schedule.income_tax_rate)));
    lines
}

/// Format both fee schedules for terminal output
pub fn format_schedules_table() -> String {
    let mut output = String::new();

    for regime in Regime::ALL {
        let mut builder = Builder::default();
        builder.push_record(["Charge", "Rate"]);
        for (label, text) in describe_schedule(regime.schedule()) {
            builder.push_record([label.to_string(), text]);
        }
        let mut table = builder.build();
        table.with(Style::modern());

        output.push_str(&format!("\n{}\n{}\n", regime.display_name().bold(), table));
    }

    output
}

/// Format both fee schedules as JSON keyed by regime
pub fn format_schedules_json() -> Result<String> {
    #[derive(Serialize)]
    struct JsonSchedule<'a> {
        regime: Regime,
        #[serde(flatten)]
        schedule: &'a FeeSchedule,
    }

    let schedules: Vec<JsonSchedule> = Regime::ALL
        .iter()
        .map(|regime| JsonSchedule {
            regime: *regime,
            schedule: regime.schedule(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&schedules)?)
}

/// One-line user-facing rendering of a validation failure
pub fn format_calc_error(err: &CalcError) -> String {
    format!("{} {} ({})", "Error:".red().bold(), err.user_message(), err)
}
