//! Integration tests for the fee calculator
//!
//! Tests:
//! - End-to-end intraday and delivery scenarios from raw form text
//! - Validation order and error kinds
//! - Invariants that hold for every valid trade (amounts, cost floor, tax floor)
//! - Brokerage clamp boundaries
//! - Presentation rounding applied to the unrounded chain
//! - Extremely small inputs: no panics, undefined percentages

use anyhow::Result;
use etfcalc::error::{CalcError, CalcErrorKind};
use etfcalc::fees::{calculate, compute, Field, Regime, TradeForm, TradeInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Test Helpers
// =============================================================================

fn form(buy: &str, sell: &str, qty: &str) -> TradeForm {
    TradeForm::new(buy, sell, qty)
}

/// A spread of trades: tiny, mid-sized, brokerage-capped, losing and fractional
fn sample_trades() -> Vec<(Decimal, Decimal, Decimal)> {
    vec![
        (dec!(10), dec!(11), dec!(1)),
        (dec!(100), dec!(105), dec!(100)),
        (dec!(250.75), dec!(249.10), dec!(40)),
        (dec!(1500), dec!(1620.5), dec!(300)),
        (dec!(0.05), dec!(0.07), dec!(12.5)),
        (dec!(99.99), dec!(88.88), dec!(1000)),
        (dec!(312.4), dec!(312.4), dec!(7.25)),
    ]
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_intraday_from_form() -> Result<()> {
    let b = calculate(Regime::Intraday, &form("100", "105", "100"))?;
    let r = b.rounded();

    assert_eq!(r.buy_amount, dec!(10000.00));
    assert_eq!(r.sell_amount, dec!(10500.00));
    assert_eq!(r.gross_profit, dec!(500.00));
    assert_eq!(r.buy_brokerage, dec!(10.00));
    assert_eq!(r.sell_brokerage, dec!(10.50));
    assert_eq!(r.total_brokerage, dec!(20.50));
    assert_eq!(r.stt, dec!(2.63));
    assert_eq!(r.stamp_duty, dec!(0.30));
    assert_eq!(r.exchange_and_reg_fees, dec!(0.62));
    assert_eq!(r.dp_charges, dec!(18.00));
    assert_eq!(r.gst, dec!(6.93));
    assert_eq!(r.total_costs, dec!(48.97));
    assert_eq!(r.net_profit_after_costs, dec!(451.03));
    assert_eq!(r.income_tax, dec!(135.31));
    assert_eq!(r.net_profit_after_tax, dec!(315.72));
    assert_eq!(r.profit_margin, Some(dec!(5.00)));
    assert_eq!(r.cost_percentage, Some(dec!(0.49)));
    Ok(())
}

#[test]
fn test_scenario_delivery_from_form() -> Result<()> {
    let b = calculate(Regime::Delivery, &form("100", "105", "100"))?;

    assert_eq!(b.total_brokerage, Decimal::ZERO);
    assert_eq!(b.stt, dec!(20.50));
    assert_eq!(b.stamp_duty, dec!(1.50));
    assert_eq!(b.exchange_and_reg_fees, dec!(0.70725));
    assert_eq!(b.dp_charges, dec!(15.93));
    assert_eq!(b.gst, (dec!(0.70725) + dec!(0.0205)) * dec!(0.18));
    assert_eq!(b.income_tax_rate, dec!(0.20));

    let r = b.rounded();
    assert_eq!(r.exchange_and_reg_fees, dec!(0.71));
    assert_eq!(r.total_costs, dec!(38.77));
    assert_eq!(r.net_profit_after_costs, dec!(461.23));
    assert_eq!(r.income_tax, dec!(92.25));
    assert_eq!(r.net_profit_after_tax, dec!(368.99));
    Ok(())
}

#[test]
fn test_scenario_rejected_inputs() {
    let err = calculate(Regime::Intraday, &form("0", "105", "100")).unwrap_err();
    assert_eq!(err.kind(), CalcErrorKind::NonPositive);
    assert_eq!(err.field(), Some(Field::BuyPrice));

    let err = calculate(Regime::Intraday, &form("100", "105", "")).unwrap_err();
    assert_eq!(err, CalcError::MissingField(Field::Quantity));

    let err = calculate(Regime::Delivery, &form("100", "abc", "100")).unwrap_err();
    assert_eq!(err.kind(), CalcErrorKind::NotANumber);
    assert_eq!(err.field(), Some(Field::SellPrice));
}

#[test]
fn test_rounded_chain_not_compounded() -> Result<()> {
    // Rounding each component first would give 48.98 (2.63 + 0.62 + ...)
    let b = calculate(Regime::Intraday, &form("100", "105", "100"))?;
    let r = b.rounded();
    let sum_of_rounded = r.total_brokerage + r.stt + r.stamp_duty + r.exchange_and_reg_fees
        + r.dp_charges
        + r.gst;
    assert_eq!(sum_of_rounded, dec!(48.98));
    assert_eq!(r.total_costs, dec!(48.97));
    Ok(())
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_amounts_are_price_times_quantity() {
    for regime in Regime::ALL {
        for (buy, sell, qty) in sample_trades() {
            let b = compute(&TradeInput::new(regime, buy, sell, qty).unwrap());
            assert_eq!(b.buy_amount, buy * qty);
            assert_eq!(b.sell_amount, sell * qty);
            assert_eq!(b.gross_profit, sell * qty - buy * qty);
        }
    }
}

#[test]
fn test_total_costs_at_least_dp_charges() {
    for regime in Regime::ALL {
        for (buy, sell, qty) in sample_trades() {
            let b = compute(&TradeInput::new(regime, buy, sell, qty).unwrap());
            assert!(
                b.total_costs >= b.dp_charges,
                "{regime}: {} < {}",
                b.total_costs,
                b.dp_charges
            );
        }
    }
}

#[test]
fn test_income_tax_never_negative() {
    for regime in Regime::ALL {
        for (buy, sell, qty) in sample_trades() {
            let b = compute(&TradeInput::new(regime, buy, sell, qty).unwrap());
            assert!(b.income_tax >= Decimal::ZERO);
            if b.net_profit_after_costs <= Decimal::ZERO {
                assert_eq!(b.income_tax, Decimal::ZERO);
                assert_eq!(b.net_profit_after_tax, b.net_profit_after_costs);
            } else {
                assert_eq!(b.income_tax, b.net_profit_after_costs * b.income_tax_rate);
            }
        }
    }
}

#[test]
fn test_total_costs_is_sum_of_six_components() {
    for regime in Regime::ALL {
        for (buy, sell, qty) in sample_trades() {
            let b = compute(&TradeInput::new(regime, buy, sell, qty).unwrap());
            let sum = b.total_brokerage
                + b.stt
                + b.stamp_duty
                + b.exchange_and_reg_fees
                + b.dp_charges
                + b.gst;
            assert_eq!(b.total_costs, sum);
        }
    }
}

#[test]
fn test_intraday_brokerage_clamp() {
    let brokerage_for = |buy_amount: Decimal| {
        let input = TradeInput::new(Regime::Intraday, buy_amount, dec!(1), dec!(1)).unwrap();
        compute(&input).buy_brokerage
    };

    // 0.1% below the floor
    assert_eq!(brokerage_for(dec!(100)), dec!(5));
    assert_eq!(brokerage_for(dec!(4999.99)), dec!(5));
    // Inside the band
    assert_eq!(brokerage_for(dec!(5000.01)), dec!(5.00001));
    assert_eq!(brokerage_for(dec!(15000)), dec!(15));
    // Above the cap
    assert_eq!(brokerage_for(dec!(20000.01)), dec!(20));
    assert_eq!(brokerage_for(dec!(1000000)), dec!(20));
}

#[test]
fn test_fractional_quantity() -> Result<()> {
    let b = calculate(Regime::Delivery, &form("200", "210", "0.5"))?;
    assert_eq!(b.buy_amount, dec!(100));
    assert_eq!(b.sell_amount, dec!(105));
    Ok(())
}

#[test]
fn test_extreme_small_inputs_never_panic() -> Result<()> {
    let tiny = "0.000000000000000000000000001";
    let forms = [
        form(tiny, "1", "1"),
        form("1", tiny, "1"),
        form("1e-20", "1", "1e-20"),
        form(tiny, tiny, tiny),
    ];

    for regime in Regime::ALL {
        for trade in &forms {
            let b = calculate(regime, trade)?;
            assert!(b.total_costs >= b.dp_charges);
            assert!(b.income_tax >= Decimal::ZERO);
            assert!(b.rounded().total_costs >= b.rounded().dp_charges);
        }
    }
    Ok(())
}

#[test]
fn test_percentages_undefined_for_tiny_buy_value() -> Result<()> {
    for regime in Regime::ALL {
        let b = calculate(regime, &form("0.000000000000000000000000001", "1", "1"))?;
        assert_eq!(b.profit_margin, None);
        assert_eq!(b.cost_percentage, None);

        let b = calculate(regime, &form("1e-20", "1", "1e-20"))?;
        assert_eq!(b.buy_amount, Decimal::ZERO);
        assert_eq!(b.profit_margin, None);
        assert_eq!(b.cost_percentage, None);
    }
    Ok(())
}

#[test]
fn test_idempotent() -> Result<()> {
    let trade = form("123.45", "130.20", "17.5");
    for regime in Regime::ALL {
        assert_eq!(calculate(regime, &trade)?, calculate(regime, &trade)?);
    }
    Ok(())
}

#[test]
fn test_engine_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TradeInput>();
    assert_send_sync::<TradeForm>();
    assert_send_sync::<etfcalc::fees::CostBreakdown>();

    let handles: Vec<_> = (1..=4)
        .map(|qty| {
            std::thread::spawn(move || {
                let input =
                    TradeInput::new(Regime::Intraday, dec!(100), dec!(105), Decimal::from(qty))
                        .unwrap();
                compute(&input).buy_amount
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), dec!(100) * Decimal::from(i + 1));
    }
}
