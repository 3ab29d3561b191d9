//! BEA calculator: the five binary operators over catalog states.
//!
//! Every operator computes a target intensity from its operands, clamps it to
//! the 0-255 scale and selects the catalog state nearest to that target among
//! an operator-specific candidate pool. Ties on distance are broken by an
//! operator-specific preference and finally by the lowest id, so each call is
//! a pure, total function of its inputs.

use crate::config::CalculatorConfig;
use crate::error::{BeaError, BeaResult};
use crate::operator::Operator;
use crate::state::{Affect, Category, EmotionState, MAX_INTENSITY, MIN_INTENSITY, NEUTRAL_MIDPOINT};
use crate::table::{StateTable, NEUTRAL_ID};
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use tracing::debug;

/// Ethereal tier selected by the divergence operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EtherealTier {
    /// Cross-tier contrast above the high threshold: Ascension states
    Transcendent,
    /// Two cognitive states of one tier: cognitive states at Emergence or above
    Contemplative,
    /// Fallback: Emergence states
    Wonder,
}

impl EtherealTier {
    /// Whether `state` belongs to this tier's candidate pool.
    pub fn admits(self, state: &EmotionState) -> bool {
        match self {
            EtherealTier::Transcendent => state.category == Category::Ascension,
            EtherealTier::Contemplative => {
                state.is_cognitive() && state.category >= Category::Emergence
            }
            EtherealTier::Wonder => state.category == Category::Emergence,
        }
    }
}

/// Operator-specific numbers computed on the way to the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationMetrics {
    /// Emergent fusion
    Combust {
        /// Sum of both operand intensities
        pair_sum: u16,
        /// Multiplier in effect
        emergence_multiplier: f64,
        /// Target intensity after emergence, clamped to the scale
        combined_intensity: f64,
        /// Result may not be weaker than this
        floor: u8,
    },
    /// Equilibrium
    Balance {
        /// Arithmetic mean of the operands
        mean: f64,
        /// Mean after damping toward the midpoint
        damped_intensity: f64,
    },
    /// Reduction
    Dissolve {
        /// Result may not be stronger than this
        ceiling: u8,
        /// Target after reduction
        reduced_intensity: f64,
    },
    /// Enhancement
    Amplify {
        /// Intensity of the operand being amplified
        baseline: u8,
        /// Target intensity
        target_intensity: f64,
        /// True when a neutral operand caused a one-step shift within a tier
        neutral_shift: bool,
    },
    /// Ethereal contrast
    Divergence {
        /// `|a - b|`
        intensity_contrast: u8,
        /// `contrast * gain + offset`, before clamping
        divergence_intensity: f64,
        /// Operands sit in different tiers
        cross_category: bool,
        /// Tier the result was drawn from
        ethereal_tier: EtherealTier,
    },
}

/// Outcome of one operator application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    /// State selected by the operator
    pub result_state: EmotionState,
    /// Operator applied
    pub operator: Operator,
    /// Operand ids in input order
    pub operands: (u8, u8),
    /// Auxiliary numbers
    pub metrics: OperationMetrics,
}

impl OperationResult {
    /// Human-readable sentence for hosts to render.
    pub fn describe(&self, table: &StateTable) -> String {
        let name_of = |id: u8| {
            table
                .get_by_id(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|_| format!("#{id}"))
        };
        let mut text = format!(
            "{} {} {} = {} (intensity {}, {})",
            name_of(self.operands.0),
            self.operator.symbol(),
            name_of(self.operands.1),
            self.result_state.name,
            self.result_state.intensity,
            self.result_state.category,
        );
        if let OperationMetrics::Divergence {
            intensity_contrast,
            divergence_intensity,
            ..
        } = &self.metrics
        {
            text.push_str(&format!(
                "; contrast {intensity_contrast}, divergence {divergence_intensity:.1}"
            ));
        }
        text
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} #{} = {}",
            self.operands.0, self.operator, self.operands.1, self.result_state
        )
    }
}

/// Stateless calculator bound to a state table.
#[derive(Debug, Clone)]
pub struct BeaCalculator<'t> {
    table: &'t StateTable,
    config: CalculatorConfig,
}

impl<'t> BeaCalculator<'t> {
    /// Calculator with the default calibration.
    pub fn new(table: &'t StateTable) -> Self {
        Self {
            table,
            config: CalculatorConfig::default(),
        }
    }

    /// Calculator with an explicit calibration.
    pub fn with_config(table: &'t StateTable, config: CalculatorConfig) -> BeaResult<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// The table results are drawn from.
    pub fn table(&self) -> &'t StateTable {
        self.table
    }

    /// The calibration in effect.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Apply `operator` to `(a, b)`.
    ///
    /// Both operands must be records of this calculator's table. An unknown id
    /// is [`BeaError::NotFound`]; a known id whose record differs from the
    /// table's is [`BeaError::InvariantViolation`].
    pub fn combine(
        &self,
        a: &EmotionState,
        b: &EmotionState,
        operator: Operator,
    ) -> BeaResult<OperationResult> {
        for operand in [a, b] {
            self.check_operand(operand)?;
        }

        let (result_state, metrics) = match operator {
            Operator::Combust => self.combust(a, b)?,
            Operator::Balance => self.balance(a, b)?,
            Operator::Dissolve => self.dissolve(a, b)?,
            Operator::Amplify => self.amplify(a, b)?,
            Operator::Divergence => self.divergence(a, b)?,
        };

        debug!(
            operator = operator.name(),
            a = a.id,
            b = b.id,
            result = result_state.id,
            "combined emotional states"
        );

        Ok(OperationResult {
            result_state: result_state.clone(),
            operator,
            operands: (a.id, b.id),
            metrics,
        })
    }

    fn check_operand(&self, operand: &EmotionState) -> BeaResult<()> {
        let record = self.table.get_by_id(operand.id)?;
        if record != operand {
            return Err(BeaError::invariant(format!(
                "state '{}' (#{}) does not match the table record",
                operand.name, operand.id
            )));
        }
        Ok(())
    }

    /// Apply the operator named by `token`.
    pub fn combine_token(
        &self,
        a: &EmotionState,
        b: &EmotionState,
        token: &str,
    ) -> BeaResult<OperationResult> {
        let operator = Operator::resolve(token)?;
        self.combine(a, b, operator)
    }

    fn combust(
        &self,
        a: &EmotionState,
        b: &EmotionState,
    ) -> BeaResult<(&'t EmotionState, OperationMetrics)> {
        let pair_sum = u16::from(a.intensity) + u16::from(b.intensity);
        let multiplier = self.config.emergence_multiplier;
        let target = clamp_to_scale(f64::from(pair_sum) * multiplier / 2.0);
        let floor = a.intensity.max(b.intensity);
        let top = a.category.max(b.category);

        let result = nearest(
            self.table.states().iter().filter(|s| s.intensity >= floor),
            target,
            |s| (s.category <= top, Reverse(s.category)),
        )
        .ok_or_else(|| no_candidate(Operator::Combust, target))?;

        Ok((
            result,
            OperationMetrics::Combust {
                pair_sum,
                emergence_multiplier: multiplier,
                combined_intensity: target,
                floor,
            },
        ))
    }

    fn balance(
        &self,
        a: &EmotionState,
        b: &EmotionState,
    ) -> BeaResult<(&'t EmotionState, OperationMetrics)> {
        let mean = f64::from(u16::from(a.intensity) + u16::from(b.intensity)) / 2.0;
        let damped = clamp_to_scale(mean + (NEUTRAL_MIDPOINT - mean) * self.config.balance_damping);

        let result = nearest(self.table.states().iter(), damped, |s| {
            !(s.affect == Affect::Peaceful || s.category == Category::Foundation)
        })
        .ok_or_else(|| no_candidate(Operator::Balance, damped))?;

        Ok((
            result,
            OperationMetrics::Balance {
                mean,
                damped_intensity: damped,
            },
        ))
    }

    fn dissolve(
        &self,
        a: &EmotionState,
        b: &EmotionState,
    ) -> BeaResult<(&'t EmotionState, OperationMetrics)> {
        let ceiling = a.intensity.min(b.intensity);
        let target = clamp_to_scale(f64::from(ceiling) * self.config.dissolve_reduction);

        let result = nearest(
            self.table.states().iter().filter(|s| s.intensity <= ceiling),
            target,
            |s| (s.category, s.intensity),
        )
        .ok_or_else(|| no_candidate(Operator::Dissolve, target))?;

        Ok((
            result,
            OperationMetrics::Dissolve {
                ceiling,
                reduced_intensity: target,
            },
        ))
    }

    fn amplify(
        &self,
        a: &EmotionState,
        b: &EmotionState,
    ) -> BeaResult<(&'t EmotionState, OperationMetrics)> {
        if a.id == NEUTRAL_ID || b.id == NEUTRAL_ID {
            let other = if a.id == NEUTRAL_ID { b } else { a };
            let own = self.table.get_by_id(other.id)?;
            let result = self
                .table
                .all_in_category(own.category)
                .filter(|s| s.intensity > own.intensity)
                .min_by_key(|s| (s.intensity, s.id))
                .unwrap_or(own);
            return Ok((
                result,
                OperationMetrics::Amplify {
                    baseline: own.intensity,
                    target_intensity: f64::from(result.intensity),
                    neutral_shift: true,
                },
            ));
        }

        let baseline = a.intensity.max(b.intensity);
        let target = clamp_to_scale(f64::from(baseline) + f64::from(self.config.amplify_step));
        let has_stronger = self.table.states().iter().any(|s| s.intensity > baseline);

        let result = nearest(
            self.table.states().iter().filter(|s| {
                if has_stronger {
                    s.intensity > baseline
                } else {
                    s.intensity >= baseline
                }
            }),
            target,
            |s| Reverse(s.category),
        )
        .ok_or_else(|| no_candidate(Operator::Amplify, target))?;

        Ok((
            result,
            OperationMetrics::Amplify {
                baseline,
                target_intensity: target,
                neutral_shift: false,
            },
        ))
    }

    fn divergence(
        &self,
        a: &EmotionState,
        b: &EmotionState,
    ) -> BeaResult<(&'t EmotionState, OperationMetrics)> {
        let contrast = a.intensity.abs_diff(b.intensity);
        let divergence =
            f64::from(contrast) * self.config.divergence_gain + self.config.divergence_offset;
        let cross_category = a.category != b.category;

        let tier = if cross_category && divergence > self.config.divergence_high_threshold {
            EtherealTier::Transcendent
        } else if !cross_category && a.is_cognitive() && b.is_cognitive() {
            EtherealTier::Contemplative
        } else {
            EtherealTier::Wonder
        };

        let target = clamp_to_scale(divergence);
        let result = nearest(
            self.table.states().iter().filter(|s| tier.admits(s)),
            target,
            |s| Reverse(s.category),
        )
        .ok_or_else(|| no_candidate(Operator::Divergence, target))?;

        Ok((
            result,
            OperationMetrics::Divergence {
                intensity_contrast: contrast,
                divergence_intensity: divergence,
                cross_category,
                ethereal_tier: tier,
            },
        ))
    }
}

fn clamp_to_scale(value: f64) -> f64 {
    value.clamp(f64::from(MIN_INTENSITY), f64::from(MAX_INTENSITY))
}

/// Candidate closest to `target`; ties go to the smaller `preference`, then the lower id.
fn nearest<'s, K, I, P>(candidates: I, target: f64, preference: P) -> Option<&'s EmotionState>
where
    I: Iterator<Item = &'s EmotionState>,
    P: Fn(&EmotionState) -> K,
    K: Ord,
{
    candidates.min_by(|x, y| {
        x.distance_to(target)
            .total_cmp(&y.distance_to(target))
            .then_with(|| preference(x).cmp(&preference(y)))
            .then_with(|| x.id.cmp(&y.id))
    })
}

fn no_candidate(operator: Operator, target: f64) -> BeaError {
    BeaError::invariant(format!(
        "{} found no candidate state for target intensity {target:.2}",
        operator.name()
    ))
}
