//! Asset balances held by characters and reserved by research projects.

use serde::{Deserialize, Serialize};

/// Three resource categories a character holds.
///
/// Treated as a value type: `add`, `subtract` and `scaled` return new
/// balances. Callers check `covers` before subtracting; `subtract` itself
/// does not clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    #[serde(default)]
    pub technical_capability: f64,
    #[serde(default)]
    pub capital: f64,
    #[serde(default)]
    pub human: f64,
}

impl AssetBalance {
    pub fn new(technical_capability: f64, capital: f64, human: f64) -> Self {
        Self {
            technical_capability,
            capital,
            human,
        }
    }

    pub fn add(&self, other: &AssetBalance) -> AssetBalance {
        AssetBalance {
            technical_capability: self.technical_capability + other.technical_capability,
            capital: self.capital + other.capital,
            human: self.human + other.human,
        }
    }

    pub fn subtract(&self, other: &AssetBalance) -> AssetBalance {
        AssetBalance {
            technical_capability: self.technical_capability - other.technical_capability,
            capital: self.capital - other.capital,
            human: self.human - other.human,
        }
    }

    /// Multiplies every category by `factor`.
    pub fn scaled(&self, factor: f64) -> AssetBalance {
        AssetBalance {
            technical_capability: self.technical_capability * factor,
            capital: self.capital * factor,
            human: self.human * factor,
        }
    }

    /// Returns true if this balance is at least `required` in every category.
    pub fn covers(&self, required: &AssetBalance) -> bool {
        self.technical_capability >= required.technical_capability
            && self.capital >= required.capital
            && self.human >= required.human
    }

    /// Returns true if no category is negative.
    pub fn is_non_negative(&self) -> bool {
        self.technical_capability >= 0.0 && self.capital >= 0.0 && self.human >= 0.0
    }
}
