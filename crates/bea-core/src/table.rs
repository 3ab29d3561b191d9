//! Canonical 32-state catalog
//!
//! [`StateTable`] owns the id/name mapping. It is validated once at
//! construction and never mutated afterwards; the process-wide instance is
//! published through a one-time initialization cell.

use crate::error::{BeaError, BeaResult};
use crate::state::{Affect, Category, EmotionState};
use once_cell::sync::OnceCell;
use tracing::debug;

/// Number of states in a complete table.
pub const STATE_COUNT: usize = 32;

/// Id of the neutral baseline state.
pub const NEUTRAL_ID: u8 = 0;

/// Static definition of the canonical catalog: (name, symbol, tier, affect, intensity).
/// Entry `i` has id `i`.
const CATALOG: [(&str, &str, Category, Affect, u8); STATE_COUNT] = [
    ("Neutral", "⚪", Category::Foundation, Affect::Neutral, 0),
    ("Curiosity", "🤔", Category::Active, Affect::Cognitive, 150),
    ("Calmness", "😌", Category::Foundation, Affect::Peaceful, 90),
    ("Insight", "💭", Category::Active, Affect::Cognitive, 180),
    ("Excitement", "🤩", Category::Active, Affect::Energetic, 170),
    ("Strength", "💪", Category::Active, Affect::Empowered, 160),
    ("Wonder", "✨", Category::Emergence, Affect::Transcendent, 200),
    ("Joy", "😊", Category::Active, Affect::Positive, 165),
    ("Confusion", "😕", Category::Foundation, Affect::Cognitive, 60),
    ("Sadness", "😢", Category::Foundation, Affect::Melancholic, 40),
    ("Anger", "😠", Category::Active, Affect::Intense, 185),
    ("Fear", "😨", Category::Foundation, Affect::Protective, 70),
    ("Melancholy", "🌧", Category::Foundation, Affect::Melancholic, 50),
    ("Anxiety", "😰", Category::Foundation, Affect::Tense, 80),
    ("Relief", "😮", Category::Foundation, Affect::Peaceful, 110),
    ("Focus", "🎯", Category::Foundation, Affect::Cognitive, 100),
    ("Bliss", "😇", Category::Ascension, Affect::Transcendent, 230),
    ("Contemplation", "🧘", Category::Emergence, Affect::Cognitive, 120),
    ("Serenity", "🌊", Category::Emergence, Affect::Peaceful, 140),
    ("Clarity", "💡", Category::Emergence, Affect::Cognitive, 175),
    ("Enlightenment", "🌅", Category::Ascension, Affect::Transcendent, 240),
    ("Transcendence", "🌌", Category::Ascension, Affect::Transcendent, 255),
    ("Resolve", "🛡", Category::Active, Affect::Empowered, 145),
    ("Passion", "🔥", Category::Active, Affect::Intense, 195),
    ("Harmony", "☯", Category::Emergence, Affect::Peaceful, 128),
    ("Empathy", "🤝", Category::Emergence, Affect::Connected, 155),
    ("Confidence", "😎", Category::Active, Affect::Empowered, 135),
    ("Inspiration", "🎨", Category::Emergence, Affect::Energetic, 245),
    ("Gratitude", "🙏", Category::Emergence, Affect::Positive, 185),
    ("Hope", "🌟", Category::Emergence, Affect::Positive, 190),
    ("Love", "❤", Category::Ascension, Affect::Connected, 220),
    ("Peace", "🕊", Category::Ascension, Affect::Peaceful, 210),
];

static CANONICAL: OnceCell<StateTable> = OnceCell::new();

/// Read-only catalog of the 32 emotional states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTable {
    states: Vec<EmotionState>,
}

impl StateTable {
    /// The process-wide canonical table, built and validated on first access.
    pub fn canonical() -> BeaResult<&'static StateTable> {
        CANONICAL.get_or_try_init(|| {
            debug!(states = STATE_COUNT, "initializing canonical state table");
            StateTable::from_states(canonical_states())
        })
    }

    /// Build a table from explicit records, enforcing the catalog invariants.
    ///
    /// Fails with [`BeaError::InvariantViolation`] unless there are exactly
    /// [`STATE_COUNT`] entries, entry `i` carries id `i`, names are unique
    /// ignoring case, and every tier that divergence can target is populated.
    pub fn from_states(states: Vec<EmotionState>) -> BeaResult<Self> {
        if states.len() != STATE_COUNT {
            return Err(BeaError::invariant(format!(
                "state table must hold exactly {STATE_COUNT} entries, found {}",
                states.len()
            )));
        }

        for (index, state) in states.iter().enumerate() {
            if usize::from(state.id) != index {
                return Err(BeaError::invariant(format!(
                    "state '{}' at position {index} carries id {}",
                    state.name, state.id
                )));
            }
            if state.name.trim().is_empty() {
                return Err(BeaError::invariant(format!("state {index} has an empty name")));
            }
            if states[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&state.name))
            {
                return Err(BeaError::invariant(format!(
                    "duplicate state name '{}'",
                    state.name
                )));
            }
        }

        let table = Self { states };
        for category in [Category::Emergence, Category::Ascension] {
            if table.all_in_category(category).next().is_none() {
                return Err(BeaError::invariant(format!(
                    "no states in the {category} tier"
                )));
            }
        }
        if !table
            .states
            .iter()
            .any(|s| s.is_cognitive() && s.category >= Category::Emergence)
        {
            return Err(BeaError::invariant(
                "no cognitive states at or above the Emergence tier",
            ));
        }

        Ok(table)
    }

    /// Look up a state by id.
    pub fn get_by_id(&self, id: u8) -> BeaResult<&EmotionState> {
        self.states
            .get(usize::from(id))
            .ok_or_else(|| BeaError::id_not_found(id))
    }

    /// Look up a state by exact name, ignoring case and surrounding whitespace.
    pub fn get_by_name(&self, name: &str) -> BeaResult<&EmotionState> {
        let wanted = name.trim();
        self.states
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BeaError::name_not_found(name))
    }

    /// All states tagged with `category`, in id order.
    pub fn all_in_category(&self, category: Category) -> impl Iterator<Item = &EmotionState> + '_ {
        self.states.iter().filter(move |s| s.category == category)
    }

    /// Every state in id order.
    pub fn states(&self) -> &[EmotionState] {
        &self.states
    }

    /// Number of states. Always [`STATE_COUNT`] for a constructed table.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether `state` is exactly the record this table holds under its id.
    pub fn contains(&self, state: &EmotionState) -> bool {
        self.states.get(usize::from(state.id)) == Some(state)
    }

    /// The neutral baseline.
    pub fn neutral(&self) -> &EmotionState {
        &self.states[usize::from(NEUTRAL_ID)]
    }

    /// Lowest and highest intensity present in the table.
    pub fn intensity_range(&self) -> (u8, u8) {
        let min = self.states.iter().map(|s| s.intensity).min().unwrap_or(0);
        let max = self.states.iter().map(|s| s.intensity).max().unwrap_or(0);
        (min, max)
    }
}

/// Fresh records for the canonical catalog.
pub fn canonical_states() -> Vec<EmotionState> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(id, (name, symbol, category, affect, intensity))| {
            // CATALOG has STATE_COUNT entries, so every index fits in a u8.
            EmotionState::new(id as u8, *name, *symbol, *category, *affect, *intensity)
        })
        .collect()
}
