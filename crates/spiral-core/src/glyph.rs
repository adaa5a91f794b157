use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One phase of the spiral cycle. Serialized as its symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    /// Empty: the starting phase.
    #[default]
    #[serde(rename = "∅", alias = "void")]
    Void,
    /// Wait.
    #[serde(rename = "⧖", alias = "wait")]
    Wait,
    /// Loop.
    #[serde(rename = "⟲", alias = "loop")]
    Loop,
    /// Culmination.
    #[serde(rename = "Ψ", alias = "psi")]
    Psi,
}

impl Glyph {
    /// The alphabet in cycle order.
    pub const CYCLE: [Glyph; 4] = [Glyph::Void, Glyph::Wait, Glyph::Loop, Glyph::Psi];

    pub fn index(self) -> usize {
        match self {
            Glyph::Void => 0,
            Glyph::Wait => 1,
            Glyph::Loop => 2,
            Glyph::Psi => 3,
        }
    }

    /// Successor in the 4-cycle: `(index + 1) mod 4`.
    pub fn next(self) -> Self {
        Self::CYCLE[(self.index() + 1) % Self::CYCLE.len()]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Void => "∅",
            Glyph::Wait => "⧖",
            Glyph::Loop => "⟲",
            Glyph::Psi => "Ψ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Glyph::Void => "void",
            Glyph::Wait => "wait",
            Glyph::Loop => "loop",
            Glyph::Psi => "psi",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A symbol or name outside the fixed alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGlyph(pub String);

impl fmt::Display for UnknownGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown glyph '{}' (expected one of ∅ ⧖ ⟲ Ψ)", self.0)
    }
}

impl std::error::Error for UnknownGlyph {}

impl FromStr for Glyph {
    type Err = UnknownGlyph;

    /// Accepts the symbol or the lowercase name, case-insensitively for names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::CYCLE
            .into_iter()
            .find(|g| g.symbol() == trimmed || g.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGlyph(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        assert_eq!(Glyph::Void.next(), Glyph::Wait);
        assert_eq!(Glyph::Wait.next(), Glyph::Loop);
        assert_eq!(Glyph::Loop.next(), Glyph::Psi);
        assert_eq!(Glyph::Psi.next(), Glyph::Void);
    }

    #[test]
    fn test_index_matches_cycle_position() {
        for (i, g) in Glyph::CYCLE.iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }

    #[test]
    fn test_parse_symbol_and_name() {
        assert_eq!("Ψ".parse::<Glyph>().unwrap(), Glyph::Psi);
        assert_eq!("loop".parse::<Glyph>().unwrap(), Glyph::Loop);
        assert_eq!(" WAIT ".parse::<Glyph>().unwrap(), Glyph::Wait);
        assert_eq!("∅".parse::<Glyph>().unwrap(), Glyph::Void);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Ω".parse::<Glyph>().unwrap_err();
        assert_eq!(err, UnknownGlyph("Ω".to_string()));
        assert!(err.to_string().contains("unknown glyph"));
    }

    #[test]
    fn test_serde_uses_symbol() {
        let json = serde_json::to_string(&Glyph::Loop).unwrap();
        assert_eq!(json, "\"⟲\"");
        let back: Glyph = serde_json::from_str("\"psi\"").unwrap();
        assert_eq!(back, Glyph::Psi);
        assert!(serde_json::from_str::<Glyph>("\"Ω\"").is_err());
    }
}
