//! Closed enumerations for the sexagenary alphabet: the 10 heavenly stems,
//! the 12 earthly branches, and their element/zodiac classifications.
//!
//! Symbols arrive from the calendar layer as raw characters. Decoding is
//! total: a character outside the fixed alphabet becomes the `Unknown`
//! variant rather than an error, so a malformed upstream token can never
//! abort chart assembly.

use serde::{Deserialize, Serialize};

/// One of the five elements (wuxing), or `Unknown` for a symbol outside
/// the sexagenary alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
    Unknown,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
            Element::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// One of the 12 zodiac animals, or `Unknown` for an unmapped branch.
/// `Unknown` renders as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
    Unknown,
}

impl std::fmt::Display for Animal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Animal::Rat => "Rat",
            Animal::Ox => "Ox",
            Animal::Tiger => "Tiger",
            Animal::Rabbit => "Rabbit",
            Animal::Dragon => "Dragon",
            Animal::Snake => "Snake",
            Animal::Horse => "Horse",
            Animal::Goat => "Goat",
            Animal::Monkey => "Monkey",
            Animal::Rooster => "Rooster",
            Animal::Dog => "Dog",
            Animal::Pig => "Pig",
            Animal::Unknown => "",
        };
        write!(f, "{name}")
    }
}

/// A heavenly stem (tiangan). The cyclical order Jia..Gui is the canonical
/// sexagenary order; `Unknown` decodes from any character outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
    Unknown,
}

/// The 10 known stems in cyclical order.
pub const STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// Decodes a raw character into a stem. Never fails: characters outside
    /// the 10-stem alphabet decode to [`Stem::Unknown`].
    #[must_use]
    pub fn decode(c: char) -> Self {
        match c {
            '甲' => Stem::Jia,
            '乙' => Stem::Yi,
            '丙' => Stem::Bing,
            '丁' => Stem::Ding,
            '戊' => Stem::Wu,
            '己' => Stem::Ji,
            '庚' => Stem::Geng,
            '辛' => Stem::Xin,
            '壬' => Stem::Ren,
            '癸' => Stem::Gui,
            _ => Stem::Unknown,
        }
    }

    /// The stem at the given position of the 10-cycle (wraps).
    #[must_use]
    pub fn cycle(index: i64) -> Self {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let i = index.rem_euclid(10) as usize;
        STEMS[i]
    }

    /// Position in the 10-cycle, or `None` for [`Stem::Unknown`].
    #[must_use]
    pub fn index(self) -> Option<i64> {
        STEMS.iter().position(|&s| s == self).map(|i| i as i64)
    }

    /// The element governed by this stem.
    #[must_use]
    pub fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
            Stem::Unknown => Element::Unknown,
        }
    }

    /// Yang stems sit at even positions of the cycle (Jia, Bing, Wu, Geng,
    /// Ren). `Unknown` counts as yin.
    #[must_use]
    pub fn is_yang(self) -> bool {
        self.index().is_some_and(|i| i % 2 == 0)
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Stem::Unknown
    }

    /// The canonical character, or `'?'` for `Unknown`.
    #[must_use]
    pub fn character(self) -> char {
        match self {
            Stem::Jia => '甲',
            Stem::Yi => '乙',
            Stem::Bing => '丙',
            Stem::Ding => '丁',
            Stem::Wu => '戊',
            Stem::Ji => '己',
            Stem::Geng => '庚',
            Stem::Xin => '辛',
            Stem::Ren => '壬',
            Stem::Gui => '癸',
            Stem::Unknown => '?',
        }
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.character())
    }
}

/// An earthly branch (dizhi) in the canonical order Zi..Hai.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
    Unknown,
}

/// The 12 known branches in cyclical order.
pub const BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Decodes a raw character into a branch. Never fails: characters
    /// outside the 12-branch alphabet decode to [`Branch::Unknown`].
    #[must_use]
    pub fn decode(c: char) -> Self {
        match c {
            '子' => Branch::Zi,
            '丑' => Branch::Chou,
            '寅' => Branch::Yin,
            '卯' => Branch::Mao,
            '辰' => Branch::Chen,
            '巳' => Branch::Si,
            '午' => Branch::Wu,
            '未' => Branch::Wei,
            '申' => Branch::Shen,
            '酉' => Branch::You,
            '戌' => Branch::Xu,
            '亥' => Branch::Hai,
            _ => Branch::Unknown,
        }
    }

    /// The branch at the given position of the 12-cycle (wraps).
    #[must_use]
    pub fn cycle(index: i64) -> Self {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let i = index.rem_euclid(12) as usize;
        BRANCHES[i]
    }

    /// Position in the 12-cycle, or `None` for [`Branch::Unknown`].
    #[must_use]
    pub fn index(self) -> Option<i64> {
        BRANCHES.iter().position(|&b| b == self).map(|i| i as i64)
    }

    /// The element governed by this branch.
    #[must_use]
    pub fn element(self) -> Element {
        match self {
            Branch::Zi | Branch::Hai => Element::Water,
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Chen | Branch::Xu | Branch::Chou | Branch::Wei => Element::Earth,
            Branch::Unknown => Element::Unknown,
        }
    }

    /// The zodiac animal associated with this branch.
    #[must_use]
    pub fn animal(self) -> Animal {
        match self {
            Branch::Zi => Animal::Rat,
            Branch::Chou => Animal::Ox,
            Branch::Yin => Animal::Tiger,
            Branch::Mao => Animal::Rabbit,
            Branch::Chen => Animal::Dragon,
            Branch::Si => Animal::Snake,
            Branch::Wu => Animal::Horse,
            Branch::Wei => Animal::Goat,
            Branch::Shen => Animal::Monkey,
            Branch::You => Animal::Rooster,
            Branch::Xu => Animal::Dog,
            Branch::Hai => Animal::Pig,
            Branch::Unknown => Animal::Unknown,
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Branch::Unknown
    }

    /// The canonical character, or `'?'` for `Unknown`.
    #[must_use]
    pub fn character(self) -> char {
        match self {
            Branch::Zi => '子',
            Branch::Chou => '丑',
            Branch::Yin => '寅',
            Branch::Mao => '卯',
            Branch::Chen => '辰',
            Branch::Si => '巳',
            Branch::Wu => '午',
            Branch::Wei => '未',
            Branch::Shen => '申',
            Branch::You => '酉',
            Branch::Xu => '戌',
            Branch::Hai => '亥',
            Branch::Unknown => '?',
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.character())
    }
}
