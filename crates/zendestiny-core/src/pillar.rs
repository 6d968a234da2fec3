//! Pillar normalization: one chart position built from a raw (stem, branch)
//! pair with its derived classifications.

use serde::{Deserialize, Serialize};

use crate::symbols::{Animal, Branch, Element, Stem};

/// One of the four chart positions (year, month, day, hour).
///
/// The derived fields are pure functions of `stem` and `branch`; they are
/// filled in by the constructors and never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub stem_element: Element,
    pub branch_element: Element,
    pub branch_animal: Animal,
}

impl Pillar {
    /// Builds a pillar from already-decoded symbols.
    ///
    /// The pair is treated as opaque calendar output: no check that it is a
    /// calendrically valid stem/branch combination.
    #[must_use]
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            stem_element: stem.element(),
            branch_element: branch.element(),
            branch_animal: branch.animal(),
        }
    }

    /// Builds a pillar from raw characters. Characters outside the
    /// sexagenary alphabet decode to the `Unknown` sentinels rather than
    /// failing.
    #[must_use]
    pub fn from_chars(stem: char, branch: char) -> Self {
        Self::new(Stem::decode(stem), Branch::decode(branch))
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_match_the_classification_tables() {
        let pillar = Pillar::from_chars('甲', '子');
        assert_eq!(pillar.stem, Stem::Jia);
        assert_eq!(pillar.branch, Branch::Zi);
        assert_eq!(pillar.stem_element, Element::Wood);
        assert_eq!(pillar.branch_element, Element::Water);
        assert_eq!(pillar.branch_animal, Animal::Rat);
    }

    #[test]
    fn construction_is_deterministic() {
        let a = Pillar::from_chars('庚', '午');
        let b = Pillar::from_chars('庚', '午');
        assert_eq!(a, b);
    }

    #[test]
    fn normalization_is_idempotent_over_stored_symbols() {
        let first = Pillar::from_chars('癸', '亥');
        let again = Pillar::new(first.stem, first.branch);
        assert_eq!(first, again);
    }

    #[test]
    fn unmapped_symbols_yield_sentinels_not_errors() {
        let pillar = Pillar::from_chars('x', 'y');
        assert_eq!(pillar.stem, Stem::Unknown);
        assert_eq!(pillar.stem_element, Element::Unknown);
        assert_eq!(pillar.branch_element, Element::Unknown);
        assert_eq!(pillar.branch_animal, Animal::Unknown);
    }

    #[test]
    fn displays_as_the_combined_token() {
        assert_eq!(Pillar::from_chars('甲', '子').to_string(), "甲子");
    }
}
