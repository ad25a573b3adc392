use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TierError;

/// Tier labels, best first. The derived `Ord` follows declaration order,
/// so `Tier::God < Tier::Shit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    God,
    S,
    A,
    B,
    C,
    D,
    F,
    Shit,
}

impl Tier {
    /// Every tier in rank order.
    pub const ALL: [Tier; 8] = [
        Tier::God,
        Tier::S,
        Tier::A,
        Tier::B,
        Tier::C,
        Tier::D,
        Tier::F,
        Tier::Shit,
    ];

    /// Order in which band counts are trimmed (or padded) to fit the population.
    /// Middle tiers give first so the extremes keep their shape.
    pub const ADJUSTMENT_ORDER: [Tier; 8] = [
        Tier::B,
        Tier::C,
        Tier::A,
        Tier::D,
        Tier::S,
        Tier::F,
        Tier::God,
        Tier::Shit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::God => "God",
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::F => "F",
            Tier::Shit => "Shit",
        }
    }

    /// Display color as an RGB triple.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Tier::God => (0xFF, 0x45, 0x00),
            Tier::S => (0xFF, 0x8C, 0x00),
            Tier::A => (0xFF, 0xD7, 0x00),
            Tier::B => (0x32, 0xCD, 0x32),
            Tier::C => (0x1E, 0x90, 0xFF),
            Tier::D => (0x93, 0x70, 0xDB),
            Tier::F => (0x8B, 0x00, 0x00),
            // Black is invisible on most terminals
            Tier::Shit => (0x80, 0x80, 0x80),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TierError::invalid(format!("unknown tier '{}'", s)))
    }
}
