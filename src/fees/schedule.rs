use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fee regime a round trip is settled under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Opened and closed within the same session
    Intraday,
    /// Held beyond the session and settled into holdings
    Delivery,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Regime::Intraday, Regime::Delivery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Intraday => "intraday",
            Regime::Delivery => "delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Regime::Intraday => "Intraday",
            Regime::Delivery => "Delivery",
        }
    }

    /// Static fee schedule for this regime
    pub fn schedule(&self) -> &'static FeeSchedule {
        match self {
            Regime::Intraday => &INTRADAY,
            Regime::Delivery => &DELIVERY,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Regime {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intraday" | "mis" | "i" => Ok(Regime::Intraday),
            "delivery" | "cnc" | "d" => Ok(Regime::Delivery),
            _ => Err(()),
        }
    }
}

/// How brokerage is charged on each leg of the trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Brokerage {
    Free,
    /// `rate` of the leg value, clamped to `[min, max]` per order
    Clamped {
        rate: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

impl Brokerage {
    /// Brokerage for a single order of `amount`
    pub fn per_order(&self, amount: Decimal) -> Decimal {
        match self {
            Brokerage::Free => Decimal::ZERO,
            Brokerage::Clamped { rate, min, max } => (amount * *rate).clamp(*min, *max),
        }
    }
}

/// Which side of the round trip a percentage levy is charged on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevyBase {
    Buy,
    Sell,
    /// Buy value plus sell value
    Turnover,
}

/// A levy charged as a fraction of trade value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Levy {
    pub rate: Decimal,
    pub base: LevyBase,
}

impl Levy {
    pub fn apply(&self, buy_amount: Decimal, sell_amount: Decimal) -> Decimal {
        let base = match self.base {
            LevyBase::Buy => buy_amount,
            LevyBase::Sell => sell_amount,
            LevyBase::Turnover => buy_amount + sell_amount,
        };
        base * self.rate
    }
}

/// Components GST is levied on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GstBase {
    /// Total brokerage plus DP charges
    BrokerageAndDp,
    /// Exchange/regulatory fees plus the SEBI turnover fee
    ExchangeAndSebi,
}

/// Complete set of rates for one regime.
///
/// Schedules are compiled in; they are not read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    pub brokerage: Brokerage,
    pub stt: Levy,
    pub stamp_duty: Levy,
    pub exchange_fees: Levy,
    /// Only feeds the GST base; never counted in total costs
    pub sebi_fee: Option<Levy>,
    pub dp_charges: Decimal,
    pub gst_rate: Decimal,
    pub gst_base: GstBase,
    pub income_tax_rate: Decimal,
}

const fn decimal(mantissa: u32, scale: u32) -> Decimal {
    Decimal::from_parts(mantissa, 0, 0, false, scale)
}

static INTRADAY: FeeSchedule = FeeSchedule {
    brokerage: Brokerage::Clamped {
        rate: decimal(1, 3),
        min: decimal(5, 0),
        max: decimal(20, 0),
    },
    stt: Levy {
        rate: decimal(25, 5),
        base: LevyBase::Sell,
    },
    stamp_duty: Levy {
        rate: decimal(3, 5),
        base: LevyBase::Buy,
    },
    exchange_fees: Levy {
        rate: decimal(3, 5),
        base: LevyBase::Turnover,
    },
    sebi_fee: None,
    dp_charges: decimal(18, 0),
    gst_rate: decimal(18, 2),
    gst_base: GstBase::BrokerageAndDp,
    income_tax_rate: decimal(30, 2),
};

static DELIVERY: FeeSchedule = FeeSchedule {
    brokerage: Brokerage::Free,
    stt: Levy {
        rate: decimal(1, 3),
        base: LevyBase::Turnover,
    },
    stamp_duty: Levy {
        rate: decimal(15, 5),
        base: LevyBase::Buy,
    },
    exchange_fees: Levy {
        rate: decimal(345, 7),
        base: LevyBase::Turnover,
    },
    sebi_fee: Some(Levy {
        rate: decimal(1, 6),
        base: LevyBase::Turnover,
    }),
    dp_charges: decimal(1593, 2),
    gst_rate: decimal(18, 2),
    gst_base: GstBase::ExchangeAndSebi,
    income_tax_rate: decimal(20, 2),
};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_regime_from_str() {
        assert_eq!(Regime::from_str("intraday"), Ok(Regime::Intraday));
        assert_eq!(Regime::from_str(" Delivery "), Ok(Regime::Delivery));
        assert_eq!(Regime::from_str("CNC"), Ok(Regime::Delivery));
        assert_eq!(Regime::from_str("MIS"), Ok(Regime::Intraday));
        assert!(Regime::from_str("futures").is_err());
    }

    #[test]
    fn test_schedule_constants() {
        let intraday = Regime::Intraday.schedule();
        assert_eq!(intraday.stt.rate, dec!(0.00025));
        assert_eq!(intraday.stamp_duty.rate, dec!(0.00003));
        assert_eq!(intraday.exchange_fees.rate, dec!(0.00003));
        assert_eq!(intraday.dp_charges, dec!(18));
        assert_eq!(intraday.income_tax_rate, dec!(0.30));
        assert!(intraday.sebi_fee.is_none());

        let delivery = Regime::Delivery.schedule();
        assert_eq!(delivery.brokerage, Brokerage::Free);
        assert_eq!(delivery.stt.rate, dec!(0.001));
        assert_eq!(delivery.stamp_duty.rate, dec!(0.00015));
        assert_eq!(delivery.exchange_fees.rate, dec!(0.0000345));
        assert_eq!(delivery.sebi_fee.map(|l| l.rate), Some(dec!(0.000001)));
        assert_eq!(delivery.dp_charges, dec!(15.93));
        assert_eq!(delivery.income_tax_rate, dec!(0.20));
    }

    #[test]
    fn test_brokerage_clamp() {
        let brokerage = Regime::Intraday.schedule().brokerage;
        // 0.1% of 1000 is 1, below the floor
        assert_eq!(brokerage.per_order(dec!(1000)), dec!(5));
        // 0.1% of 50000 is 50, above the cap
        assert_eq!(brokerage.per_order(dec!(50000)), dec!(20));
        assert_eq!(brokerage.per_order(dec!(12345)), dec!(12.345));
        // Boundaries are inclusive
        assert_eq!(brokerage.per_order(dec!(5000)), dec!(5));
        assert_eq!(brokerage.per_order(dec!(20000)), dec!(20));

        assert_eq!(Brokerage::Free.per_order(dec!(50000)), Decimal::ZERO);
    }

    #[test]
    fn test_levy_bases() {
        let buy = dec!(1000);
        let sell = dec!(2000);
        let rate = dec!(0.01);
        let levy = |base| Levy { rate, base };

        assert_eq!(levy(LevyBase::Buy).apply(buy, sell), dec!(10));
        assert_eq!(levy(LevyBase::Sell).apply(buy, sell), dec!(20));
        assert_eq!(levy(LevyBase::Turnover).apply(buy, sell), dec!(30));
    }
}
