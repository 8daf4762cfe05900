//! Calculator session state
//!
//! Caller-owned value holding everything the interactive front-end shows:
//! the selected regime, the raw form fields and the last breakdown. The
//! screen is derived from that state rather than stored.

use crate::error::SessionError;
use crate::fees::{calculate, CostBreakdown, Field, Regime, TradeForm};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    RegimeSelect,
    Calculator,
    Results,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    regime: Option<Regime>,
    form: TradeForm,
    result: Option<CostBreakdown>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start directly on the calculator screen
    pub fn with_regime(regime: Regime) -> Self {
        Self {
            regime: Some(regime),
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        match (self.regime, &self.result) {
            (None, _) => Screen::RegimeSelect,
            (Some(_), None) => Screen::Calculator,
            (Some(_), Some(_)) => Screen::Results,
        }
    }

    pub fn regime(&self) -> Option<Regime> {
        self.regime
    }

    pub fn form(&self) -> &TradeForm {
        &self.form
    }

    pub fn result(&self) -> Option<&CostBreakdown> {
        self.result.as_ref()
    }

    /// Pick a regime. A result computed under another regime is discarded.
    pub fn select_regime(&mut self, regime: Regime) {
        if self.regime != Some(regime) {
            self.result = None;
        }
        self.regime = Some(regime);
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), SessionError> {
        if self.regime.is_none() {
            return Err(SessionError::NoRegimeSelected);
        }
        self.form.set(field, value);
        Ok(())
    }

    /// Run the calculator on the current form.
    ///
    /// On failure the previous result is discarded so a stale breakdown is
    /// never shown next to an error.
    pub fn calculate(&mut self) -> Result<&CostBreakdown, SessionError> {
        let regime = self.regime.ok_or(SessionError::NoRegimeSelected)?;
        self.result = None;
        let breakdown = calculate(regime, &self.form)?;
        Ok(self.result.insert(breakdown))
    }

    /// Clear inputs and the last result, staying on the calculator
    pub fn reset(&mut self) {
        self.form.clear();
        self.result = None;
    }

    /// Return to regime selection. The typed inputs are kept for the next
    /// regime; the result is dropped.
    pub fn back(&mut self) {
        self.result = None;
        self.regime = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use rust_decimal_macros::dec;

    fn filled(regime: Regime) -> Session {
        let mut session = Session::with_regime(regime);
        session.set_field(Field::BuyPrice, "100").unwrap();
        session.set_field(Field::SellPrice, "105").unwrap();
        session.set_field(Field::Quantity, "100").unwrap();
        session
    }

    #[test]
    fn test_screen_flow() {
        let mut session = Session::new();
        assert_eq!(session.screen(), Screen::RegimeSelect);

        session.select_regime(Regime::Intraday);
        assert_eq!(session.screen(), Screen::Calculator);

        session.set_field(Field::BuyPrice, "100").unwrap();
        session.set_field(Field::SellPrice, "105").unwrap();
        session.set_field(Field::Quantity, "100").unwrap();
        let result = session.calculate().unwrap();
        assert_eq!(result.total_costs, dec!(48.97));
        assert_eq!(session.screen(), Screen::Results);

        session.reset();
        assert_eq!(session.screen(), Screen::Calculator);
        assert!(session.form().is_empty());

        session.back();
        assert_eq!(session.screen(), Screen::RegimeSelect);
        assert_eq!(session.regime(), None);
    }

    #[test]
    fn test_back_keeps_form_and_drops_result() {
        let mut session = filled(Regime::Intraday);
        session.calculate().unwrap();

        session.back();
        assert_eq!(session.screen(), Screen::RegimeSelect);
        assert!(session.result().is_none());
        assert_eq!(session.form().get(Field::BuyPrice), "100");
        assert_eq!(session.form().get(Field::Quantity), "100");

        session.select_regime(Regime::Delivery);
        let result = session.calculate().unwrap();
        assert_eq!(result.total_costs, dec!(38.768245));
    }

    #[test]
    fn test_requires_regime() {
        let mut session = Session::new();
        assert_eq!(
            session.set_field(Field::Quantity, "1"),
            Err(SessionError::NoRegimeSelected)
        );
        assert_eq!(
            session.calculate().unwrap_err(),
            SessionError::NoRegimeSelected
        );
    }

    #[test]
    fn test_failed_calculation_discards_previous_result() {
        let mut session = filled(Regime::Intraday);
        session.calculate().unwrap();
        assert!(session.result().is_some());

        session.set_field(Field::Quantity, "").unwrap();
        let err = session.calculate().unwrap_err();
        assert_eq!(
            err,
            SessionError::Calc(CalcError::MissingField(Field::Quantity))
        );
        assert!(session.result().is_none());
        assert_eq!(session.screen(), Screen::Calculator);
    }

    #[test]
    fn test_switching_regime_discards_result_but_keeps_form() {
        let mut session = filled(Regime::Intraday);
        session.calculate().unwrap();

        session.select_regime(Regime::Intraday);
        assert!(session.result().is_some());

        session.select_regime(Regime::Delivery);
        assert!(session.result().is_none());
        assert_eq!(session.form().get(Field::BuyPrice), "100");

        let result = session.calculate().unwrap();
        assert_eq!(result.regime, Regime::Delivery);
        assert_eq!(result.total_costs, dec!(38.768245));
    }
}
