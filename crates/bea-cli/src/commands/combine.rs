// Operator application on two named states

use bea_core::{BeaError, CalculatorConfig, OperationDispatcher, StateTable};

/// Dispatch one request and print the outcome.
///
/// # Arguments
/// * `config` - Calibration to run with
/// * `operator` - Operator token as typed
/// * `state_a` / `state_b` - State names as typed
/// * `json` - Print the full result as JSON instead of a sentence
pub fn run(
    config: CalculatorConfig,
    operator: &str,
    state_a: &str,
    state_b: &str,
    json: bool,
) -> anyhow::Result<()> {
    let table = StateTable::canonical()?;
    let dispatcher = OperationDispatcher::with_config(table, config)?;

    let result = match dispatcher.dispatch(operator, state_a, state_b) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", clarification(&err));
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.describe(table));
    }

    tracing::info!(
        operator = result.operator.name(),
        result = %result.result_state.name,
        "combination complete"
    );
    Ok(())
}

/// Prompt text for a failed request.
fn clarification(err: &BeaError) -> String {
    match err {
        BeaError::NotFound { reference } => format!(
            "I don't know the state '{reference}'. Run `bea states` for the 32 known states."
        ),
        BeaError::UnsupportedOperator { token } => format!(
            "'{token}' is not an operator. Choose combust, balance, dissolve, amplify or divergence."
        ),
        other => other.to_string(),
    }
}
