//! Emotional state value types
//!
//! An [`EmotionState`] is one immutable catalog entry. Its [`Category`] is the
//! tier used by operator tie-breaking and divergence; its [`Affect`] is a
//! descriptive family tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest intensity on the catalog scale.
pub const MIN_INTENSITY: u8 = 0;

/// Highest intensity on the catalog scale.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// Midpoint the balance operator damps toward.
pub const NEUTRAL_MIDPOINT: f64 = 128.0;

/// Tier a state belongs to, ordered from grounded to ascended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Baseline, grounding and low-charge states
    Foundation,
    /// Engaged, outward-directed states
    Active,
    /// States where something new appears
    Emergence,
    /// Peak, transcendent states
    Ascension,
}

impl Category {
    /// All tiers in ascending order.
    pub const ALL: [Category; 4] = [
        Category::Foundation,
        Category::Active,
        Category::Emergence,
        Category::Ascension,
    ];

    /// Position in the tier order, 0 for Foundation.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Foundation => "foundation",
            Category::Active => "active",
            Category::Emergence => "emergence",
            Category::Ascension => "ascension",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Foundation => "Foundation",
            Category::Active => "Active",
            Category::Emergence => "Emergence",
            Category::Ascension => "Ascension",
        };
        f.pad(label)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category '{wanted}'"))
    }
}

/// Affective family of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affect {
    /// The baseline only
    Neutral,
    /// Thinking, noticing, understanding
    Cognitive,
    /// Settled and at rest
    Peaceful,
    /// Charged and eager
    Energetic,
    /// Capable and resolved
    Empowered,
    /// Reaching beyond the self
    Transcendent,
    /// Warm and glad
    Positive,
    /// Turned toward others
    Connected,
    /// Low and wistful
    Melancholic,
    /// Hot and forceful
    Intense,
    /// Guarding against threat
    Protective,
    /// Strained and uneasy
    Tense,
}

impl Affect {
    /// Lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Affect::Neutral => "neutral",
            Affect::Cognitive => "cognitive",
            Affect::Peaceful => "peaceful",
            Affect::Energetic => "energetic",
            Affect::Empowered => "empowered",
            Affect::Transcendent => "transcendent",
            Affect::Positive => "positive",
            Affect::Connected => "connected",
            Affect::Melancholic => "melancholic",
            Affect::Intense => "intense",
            Affect::Protective => "protective",
            Affect::Tense => "tense",
        }
    }
}

impl fmt::Display for Affect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmotionState {
    /// Stable identity, 0..=31 in the canonical table
    pub id: u8,
    /// Unique human-readable name
    pub name: String,
    /// Display glyph, cosmetic only
    pub symbol: String,
    /// Tier used for weighting and divergence
    pub category: Category,
    /// Affective family tag
    pub affect: Affect,
    /// Charge of the state on the 0-255 scale
    pub intensity: u8,
}

impl EmotionState {
    /// Create a new state record.
    pub fn new(
        id: u8,
        name: impl Into<String>,
        symbol: impl Into<String>,
        category: Category,
        affect: Affect,
        intensity: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            category,
            affect,
            intensity,
        }
    }

    /// Whether this state carries the cognitive tag.
    pub fn is_cognitive(&self) -> bool {
        self.affect == Affect::Cognitive
    }

    /// Distance between this state's intensity and a computed target.
    pub(crate) fn distance_to(&self, target: f64) -> f64 {
        (f64::from(self.intensity) - target).abs()
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        assert!(Category::Foundation < Category::Active);
        assert!(Category::Emergence < Category::Ascension);
        assert_eq!(Category::Ascension.rank(), 3);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Ascension".parse::<Category>(), Ok(Category::Ascension));
        assert_eq!(" foundation ".parse::<Category>(), Ok(Category::Foundation));
        assert!("melancholic".parse::<Category>().is_err());
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("[{:<10}]", Category::Active), "[Active    ]");
        assert_eq!(format!("[{:>6}]", Affect::Tense), "[ tense]");
    }

    #[test]
    fn test_distance_to_target() {
        let state = EmotionState::new(
            21,
            "Transcendence",
            "🌌",
            Category::Ascension,
            Affect::Transcendent,
            255,
        );
        assert!((state.distance_to(250.0) - 5.0).abs() < f64::EPSILON);
        assert!((state.distance_to(260.5) - 5.5).abs() < f64::EPSILON);
    }
}
