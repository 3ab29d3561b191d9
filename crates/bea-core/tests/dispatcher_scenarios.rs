//! End-to-end dispatcher scenarios
//!
//! Requests as they would arrive from an intent handler: an operator phrase
//! plus two state names.

#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]

use assert_matches::assert_matches;
use bea_core::{
    BeaError, CalculatorConfig, Category, EtherealTier, Operator, OperationDispatcher,
    OperationMetrics, StateRef, StateTable,
};
use proptest::prelude::*;

fn dispatcher() -> OperationDispatcher<'static> {
    OperationDispatcher::new(StateTable::canonical().expect("canonical table is valid"))
}

#[test]
fn combust_curiosity_with_bliss_yields_inspiration() {
    let result = dispatcher().dispatch("combust", "Curiosity", "Bliss").unwrap();
    assert_eq!(result.result_state.name, "Inspiration");
    assert!(result.result_state.intensity >= 230);
}

#[test]
fn divergence_focus_bliss_crosses_into_transcendence() {
    let result = dispatcher().dispatch("divergence", "Focus", "Bliss").unwrap();
    assert_eq!(result.result_state.name, "Transcendence");
    assert_eq!(result.result_state.category, Category::Ascension);
    let OperationMetrics::Divergence {
        intensity_contrast,
        divergence_intensity,
        cross_category,
        ethereal_tier,
    } = result.metrics
    else {
        panic!("expected divergence metrics");
    };
    assert_eq!(intensity_contrast, 130);
    assert!((divergence_intensity - 249.0).abs() < 1e-9);
    assert!(cross_category);
    assert_eq!(ethereal_tier, EtherealTier::Transcendent);
}

#[test]
fn divergence_curiosity_insight_is_contemplative() {
    let result = dispatcher().dispatch("≠", "Curiosity", "Insight").unwrap();
    assert_eq!(result.result_state.name, "Contemplation");
    assert_matches!(
        result.metrics,
        OperationMetrics::Divergence {
            intensity_contrast: 30,
            cross_category: false,
            ethereal_tier: EtherealTier::Contemplative,
            ..
        }
    );
}

#[test]
fn unknown_state_name_is_reported() {
    let err = dispatcher()
        .dispatch("combust", "NotAState", "Curiosity")
        .unwrap_err();
    assert_eq!(
        err,
        BeaError::NotFound {
            reference: StateRef::Name("NotAState".to_string())
        }
    );
    assert!(err.to_string().contains("NotAState"));
}

#[test]
fn unknown_operator_is_reported() {
    let err = dispatcher()
        .dispatch("unknownop", "Curiosity", "Calmness")
        .unwrap_err();
    assert_eq!(err, BeaError::unsupported_operator("unknownop"));
}

#[test]
fn operand_order_is_preserved() {
    let forward = dispatcher().dispatch("balance", "Joy", "Fear").unwrap();
    let backward = dispatcher().dispatch("balance", "Fear", "Joy").unwrap();
    assert_eq!(forward.operands, (7, 11));
    assert_eq!(backward.operands, (11, 7));
}

#[test]
fn custom_calibration_changes_the_outcome() {
    let table = StateTable::canonical().unwrap();
    let config = CalculatorConfig {
        divergence_high_threshold: 250.0,
        ..CalculatorConfig::default()
    };
    let dispatcher = OperationDispatcher::with_config(table, config).unwrap();
    let result = dispatcher.dispatch("divergence", "Focus", "Bliss").unwrap();
    assert_matches!(
        result.metrics,
        OperationMetrics::Divergence {
            ethereal_tier: EtherealTier::Wonder,
            ..
        }
    );
    assert_eq!(result.result_state.category, Category::Emergence);
}

#[test]
fn result_serializes_for_hosts() {
    let result = dispatcher().dispatch("amplify", "Neutral", "Focus").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result_state"]["name"], "Relief");
    assert_eq!(json["operator"], "amplify");
    assert_eq!(json["metrics"]["kind"], "amplify");
    assert_eq!(json["metrics"]["neutral_shift"], true);
}

proptest! {
    #[test]
    fn prop_every_synonym_dispatches(op_index in 0usize..5, a in 0u8..32, b in 0u8..32) {
        let table = StateTable::canonical().unwrap();
        let op = Operator::ALL[op_index];
        let name_a = &table.get_by_id(a).unwrap().name;
        let name_b = &table.get_by_id(b).unwrap().name;
        let expected = dispatcher().dispatch(op.name(), name_a, name_b).unwrap();
        for synonym in op.synonyms() {
            let result = dispatcher().dispatch(synonym, name_a, name_b).unwrap();
            prop_assert_eq!(&result, &expected);
        }
    }
}
