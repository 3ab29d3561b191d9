//! Text-level entry point
//!
//! Turns an operator phrase and two state names, as they arrive from an
//! intent slot or a command line, into a calculator call.

use crate::calculator::{BeaCalculator, OperationResult};
use crate::config::CalculatorConfig;
use crate::error::BeaResult;
use crate::operator::Operator;
use crate::table::StateTable;
use tracing::{instrument, warn};

/// Resolves tokens and names, then delegates to [`BeaCalculator`].
#[derive(Debug, Clone)]
pub struct OperationDispatcher<'t> {
    calculator: BeaCalculator<'t>,
}

impl<'t> OperationDispatcher<'t> {
    /// Dispatcher over `table` with the default calibration.
    pub fn new(table: &'t StateTable) -> Self {
        Self {
            calculator: BeaCalculator::new(table),
        }
    }

    /// Dispatcher with an explicit calibration.
    pub fn with_config(table: &'t StateTable, config: CalculatorConfig) -> BeaResult<Self> {
        Ok(Self {
            calculator: BeaCalculator::with_config(table, config)?,
        })
    }

    /// Wrap an existing calculator.
    pub fn from_calculator(calculator: BeaCalculator<'t>) -> Self {
        Self { calculator }
    }

    /// The calculator requests are delegated to.
    pub fn calculator(&self) -> &BeaCalculator<'t> {
        &self.calculator
    }

    /// Resolve `operator_token`, `state_a` and `state_b`, then combine.
    ///
    /// The operator is resolved first, so a request with both a bad operator
    /// and a bad name reports the operator. Name failures report the name as
    /// given.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(
        &self,
        operator_token: &str,
        state_a: &str,
        state_b: &str,
    ) -> BeaResult<OperationResult> {
        let operator = Operator::resolve(operator_token).map_err(|e| {
            warn!(token = operator_token, "unsupported operator");
            e
        })?;

        let table = self.calculator.table();
        let a = table.get_by_name(state_a).map_err(|e| {
            warn!(name = state_a, "unknown emotional state");
            e
        })?;
        let b = table.get_by_name(state_b).map_err(|e| {
            warn!(name = state_b, "unknown emotional state");
            e
        })?;

        self.calculator.combine(a, b, operator)
    }

    /// [`dispatch`](Self::dispatch) followed by [`OperationResult::describe`].
    pub fn dispatch_described(
        &self,
        operator_token: &str,
        state_a: &str,
        state_b: &str,
    ) -> BeaResult<String> {
        let result = self.dispatch(operator_token, state_a, state_b)?;
        Ok(result.describe(self.calculator.table()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BeaError, StateRef};
    use assert_matches::assert_matches;

    fn dispatcher() -> OperationDispatcher<'static> {
        OperationDispatcher::new(StateTable::canonical().expect("canonical table is valid"))
    }

    #[test]
    fn test_dispatch_resolves_synonyms_and_case() {
        let result = dispatcher().dispatch("FUSE", "curiosity", " BLISS ").unwrap();
        assert_eq!(result.operator, Operator::Combust);
        assert_eq!(result.result_state.name, "Inspiration");
    }

    #[test]
    fn test_unknown_state_is_named() {
        let err = dispatcher()
            .dispatch("combust", "NotAState", "Curiosity")
            .unwrap_err();
        assert_matches!(
            err,
            BeaError::NotFound { reference: StateRef::Name(ref name) } if name == "NotAState"
        );

        let err = dispatcher()
            .dispatch("combust", "Curiosity", "Nope")
            .unwrap_err();
        assert_eq!(err, BeaError::name_not_found("Nope"));
    }

    #[test]
    fn test_unknown_operator_wins_over_unknown_state() {
        let err = dispatcher()
            .dispatch("unknownop", "NotAState", "Calmness")
            .unwrap_err();
        assert_matches!(err, BeaError::UnsupportedOperator { .. });
    }

    #[test]
    fn test_dispatch_described() {
        let text = dispatcher()
            .dispatch_described("⊕", "Curiosity", "Bliss")
            .unwrap();
        assert_eq!(
            text,
            "Curiosity ⊕ Bliss = Inspiration (intensity 245, Emergence)"
        );
    }
}
