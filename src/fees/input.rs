use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::schedule::Regime;
use crate::error::CalcError;

/// Largest buy or sell value (10^18 currency units) accepted for a single trade
pub const MAX_TRADE_VALUE: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// One of the three numeric inputs of the calculator form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BuyPrice,
    SellPrice,
    Quantity,
}

impl Field {
    /// Form order; validation reports the first offending field in this order
    pub const ALL: [Field; 3] = [Field::BuyPrice, Field::SellPrice, Field::Quantity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::BuyPrice => "buy_price",
            Field::SellPrice => "sell_price",
            Field::Quantity => "quantity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::BuyPrice => "buy price",
            Field::SellPrice => "sell price",
            Field::Quantity => "quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "buy" | "buy_price" | "bp" => Ok(Field::BuyPrice),
            "sell" | "sell_price" | "sp" => Ok(Field::SellPrice),
            "qty" | "quantity" | "q" => Ok(Field::Quantity),
            _ => Err(()),
        }
    }
}

/// Raw calculator form: the three inputs exactly as typed.
///
/// An empty (or whitespace-only) string means the field was left blank,
/// which is never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeForm {
    pub buy_price: String,
    pub sell_price: String,
    pub quantity: String,
}

impl TradeForm {
    pub fn new(
        buy_price: impl Into<String>,
        sell_price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            buy_price: buy_price.into(),
            sell_price: sell_price.into(),
            quantity: quantity.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::BuyPrice => &self.buy_price,
            Field::SellPrice => &self.sell_price,
            Field::Quantity => &self.quantity,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::BuyPrice => &mut self.buy_price,
            Field::SellPrice => &mut self.sell_price,
            Field::Quantity => &mut self.quantity,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// Validate the form into a [`TradeInput`].
    ///
    /// Rules short-circuit in order: every field present, every field a
    /// number, every number positive, trade value in range.
    pub fn parse(&self, regime: Regime) -> Result<TradeInput, CalcError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| self.get(*f).trim().is_empty())
        {
            return Err(CalcError::MissingField(field));
        }

        let mut values = [Decimal::ZERO; 3];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            let raw = self.get(field).trim();
            *slot = parse_decimal(raw).ok_or_else(|| CalcError::NotANumber {
                field,
                value: raw.to_string(),
            })?;
        }

        let [buy_price, sell_price, quantity] = values;
        TradeInput::new(regime, buy_price, sell_price, quantity)
    }
}

/// Parse plain (`12.5`) or scientific (`1.25e1`) decimal notation
fn parse_decimal(input: &str) -> Option<Decimal> {
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

/// Validated inputs for one round trip.
///
/// Only constructible through [`TradeInput::new`] (or [`TradeForm::parse`]),
/// so every value held is strictly positive and the trade value is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeInput {
    regime: Regime,
    buy_price: Decimal,
    sell_price: Decimal,
    quantity: Decimal,
}

impl TradeInput {
    pub fn new(
        regime: Regime,
        buy_price: Decimal,
        sell_price: Decimal,
        quantity: Decimal,
    ) -> Result<Self, CalcError> {
        for (field, value) in Field::ALL.into_iter().zip([buy_price, sell_price, quantity]) {
            if value <= Decimal::ZERO {
                return Err(CalcError::NonPositive { field, value });
            }
        }

        for price in [buy_price, sell_price] {
            match price.checked_mul(quantity) {
                Some(amount) if amount <= MAX_TRADE_VALUE => {}
                Some(amount) => return Err(CalcError::TradeTooLarge { amount }),
                None => return Err(CalcError::TradeTooLarge { amount: Decimal::MAX }),
            }
        }

        Ok(Self {
            regime,
            buy_price,
            sell_price,
            quantity,
        })
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    pub fn sell_price(&self) -> Decimal {
        self.sell_price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn buy_amount(&self) -> Decimal {
        self.buy_price * self.quantity
    }

    pub fn sell_amount(&self) -> Decimal {
        self.sell_price * self.quantity
    }

    /// Same prices and quantity under another regime
    pub fn with_regime(&self, regime: Regime) -> Self {
        Self { regime, ..*self }
    }
}
