//! Calculator calibration
//!
//! The operator constants are calibrated to the 0-255 intensity scale. The
//! defaults reproduce the documented worked examples; hosts may override them
//! from a TOML file or `BEA_*` environment variables.

use crate::error::{BeaError, BeaResult};
use crate::state::MAX_INTENSITY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Prefix for environment overrides, e.g. `BEA_AMPLIFY_STEP=24`.
pub const ENV_PREFIX: &str = "BEA_";

/// Operator constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Combust: applied to the operand pair's sum, normalized by operand count
    pub emergence_multiplier: f64,
    /// Balance: fraction of the way the mean is pulled toward the midpoint
    pub balance_damping: f64,
    /// Dissolve: factor applied to the weaker operand (0 < f < 1)
    pub dissolve_reduction: f64,
    /// Amplify: intensity step added to the stronger operand
    pub amplify_step: u8,
    /// Divergence: gain applied to the intensity contrast
    pub divergence_gain: f64,
    /// Divergence: offset added after the gain
    pub divergence_offset: f64,
    /// Divergence: cross-tier results above this reach the Ascension tier
    pub divergence_high_threshold: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            emergence_multiplier: 1.3,
            balance_damping: 0.25,
            dissolve_reduction: 0.6,
            amplify_step: 32,
            divergence_gain: 1.3,
            divergence_offset: 80.0,
            divergence_high_threshold: 160.0,
        }
    }
}

impl CalculatorConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> BeaResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| BeaError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> BeaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BeaError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded calculator configuration");
        Ok(config)
    }

    /// Apply `BEA_<FIELD>` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> BeaResult<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from `(key, value)` pairs. Keys without the
    /// [`ENV_PREFIX`] are ignored; unknown `BEA_*` keys are ignored too.
    pub fn merge_with_vars<I>(&mut self, vars: I) -> BeaResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(field) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match field.to_ascii_lowercase().as_str() {
                "emergence_multiplier" => self.emergence_multiplier = parse_var(&key, &value)?,
                "balance_damping" => self.balance_damping = parse_var(&key, &value)?,
                "dissolve_reduction" => self.dissolve_reduction = parse_var(&key, &value)?,
                "amplify_step" => self.amplify_step = parse_var(&key, &value)?,
                "divergence_gain" => self.divergence_gain = parse_var(&key, &value)?,
                "divergence_offset" => self.divergence_offset = parse_var(&key, &value)?,
                "divergence_high_threshold" => {
                    self.divergence_high_threshold = parse_var(&key, &value)?;
                }
                _ => continue,
            }
            debug!(%key, %value, "calculator configuration override");
        }
        self.validate()
    }

    /// Check every constant is usable on the 0-255 scale.
    pub fn validate(&self) -> BeaResult<()> {
        let scale = f64::from(MAX_INTENSITY);
        let finite = [
            ("emergence_multiplier", self.emergence_multiplier),
            ("balance_damping", self.balance_damping),
            ("dissolve_reduction", self.dissolve_reduction),
            ("divergence_gain", self.divergence_gain),
            ("divergence_offset", self.divergence_offset),
            ("divergence_high_threshold", self.divergence_high_threshold),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BeaError::config(format!("{name} must be finite")));
        }
        if self.emergence_multiplier <= 0.0 {
            return Err(BeaError::config("emergence_multiplier must be positive"));
        }
        if !(0.0..=1.0).contains(&self.balance_damping) {
            return Err(BeaError::config("balance_damping must lie in 0..=1"));
        }
        if self.dissolve_reduction <= 0.0 || self.dissolve_reduction >= 1.0 {
            return Err(BeaError::config(
                "dissolve_reduction must lie strictly between 0 and 1",
            ));
        }
        if self.amplify_step == 0 {
            return Err(BeaError::config("amplify_step must be at least 1"));
        }
        if self.divergence_gain <= 0.0 {
            return Err(BeaError::config("divergence_gain must be positive"));
        }
        if !(0.0..=scale).contains(&self.divergence_offset) {
            return Err(BeaError::config("divergence_offset must lie in 0..=255"));
        }
        if !(0.0..=scale).contains(&self.divergence_high_threshold) {
            return Err(BeaError::config(
                "divergence_high_threshold must lie in 0..=255",
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> BeaResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BeaError::config(format!("{key} has unparseable value '{value}'")))
}
