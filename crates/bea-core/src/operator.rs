//! The five binary operators and their token synonyms.

use crate::error::BeaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary operator over two emotional states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// ⊕ emergent fusion ("1+1=3")
    Combust,
    /// ⊖ equilibrium seeking
    Balance,
    /// ⊗ reduction and de-escalation
    Dissolve,
    /// ⨀ enhancement from baseline
    Amplify,
    /// ≠ ethereal contrast between two states
    Divergence,
}

/// Token → operator resolution table. Matching is case-insensitive on trimmed input.
const SYNONYMS: &[(&str, Operator)] = &[
    ("combust", Operator::Combust),
    ("combine", Operator::Combust),
    ("fuse", Operator::Combust),
    ("fusion", Operator::Combust),
    ("ignite", Operator::Combust),
    ("⊕", Operator::Combust),
    ("+", Operator::Combust),
    ("balance", Operator::Balance),
    ("equilibrium", Operator::Balance),
    ("harmonize", Operator::Balance),
    ("equalize", Operator::Balance),
    ("⊖", Operator::Balance),
    ("dissolve", Operator::Dissolve),
    ("reduce", Operator::Dissolve),
    ("simplify", Operator::Dissolve),
    ("break down", Operator::Dissolve),
    ("⊗", Operator::Dissolve),
    ("amplify", Operator::Amplify),
    ("enhance", Operator::Amplify),
    ("boost", Operator::Amplify),
    ("intensify", Operator::Amplify),
    ("⨀", Operator::Amplify),
    ("divergence", Operator::Divergence),
    ("diverge", Operator::Divergence),
    ("contrast", Operator::Divergence),
    ("separate", Operator::Divergence),
    ("≠", Operator::Divergence),
    ("!=", Operator::Divergence),
];

impl Operator {
    /// All operators in canonical order.
    pub const ALL: [Operator; 5] = [
        Operator::Combust,
        Operator::Balance,
        Operator::Dissolve,
        Operator::Amplify,
        Operator::Divergence,
    ];

    /// Resolve a textual token (name, synonym or glyph).
    ///
    /// Runs of whitespace inside the token count as a single space.
    pub fn resolve(token: &str) -> Result<Self, BeaError> {
        let wanted = token.split_whitespace().collect::<Vec<_>>().join(" ");
        SYNONYMS
            .iter()
            .find(|(synonym, _)| synonym.eq_ignore_ascii_case(&wanted))
            .map(|(_, op)| *op)
            .ok_or_else(|| BeaError::unsupported_operator(token))
    }

    /// Display glyph.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Combust => "⊕",
            Operator::Balance => "⊖",
            Operator::Dissolve => "⊗",
            Operator::Amplify => "⨀",
            Operator::Divergence => "≠",
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Combust => "combust",
            Operator::Balance => "balance",
            Operator::Dissolve => "dissolve",
            Operator::Amplify => "amplify",
            Operator::Divergence => "divergence",
        }
    }

    /// Every token that resolves to this operator.
    pub fn synonyms(self) -> impl Iterator<Item = &'static str> {
        SYNONYMS
            .iter()
            .filter(move |(_, op)| *op == self)
            .map(|(synonym, _)| *synonym)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = BeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_names_and_glyphs() {
        for op in Operator::ALL {
            assert_eq!(Operator::resolve(op.name()), Ok(op));
            assert_eq!(Operator::resolve(op.symbol()), Ok(op));
        }
    }

    #[test]
    fn test_resolve_synonyms() {
        assert_eq!("Fuse".parse::<Operator>(), Ok(Operator::Combust));
        assert_eq!("  BREAK DOWN ".parse::<Operator>(), Ok(Operator::Dissolve));
        assert_eq!("!=".parse::<Operator>(), Ok(Operator::Divergence));
        assert_eq!(
            Operator::resolve("unknownop"),
            Err(BeaError::unsupported_operator("unknownop"))
        );
        assert!(Operator::resolve("").is_err());
    }

    #[test]
    fn test_resolve_collapses_inner_whitespace() {
        assert_eq!(Operator::resolve("break  down"), Ok(Operator::Dissolve));
        assert_eq!(Operator::resolve("Break\t\n down"), Ok(Operator::Dissolve));
        assert_eq!(
            Operator::resolve("break down now"),
            Err(BeaError::unsupported_operator("break down now"))
        );
        assert!(Operator::resolve("breakdown").is_err());
    }

    #[test]
    fn test_every_operator_has_synonyms() {
        for op in Operator::ALL {
            assert!(op.synonyms().count() >= 4, "{op:?} has too few synonyms");
        }
    }
}
