use std::fmt;

use serde::{Deserialize, Serialize};

/// Exact monetary quantity in minor units.
///
/// Amounts are unsigned, so an output value can never be negative by
/// construction. All arithmetic is checked: summation over a transaction's
/// inputs or outputs reports overflow instead of wrapping, and the
/// settlement core treats overflow as a validation failure.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Create from a count of minor units.
    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// The count of minor units.
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Checked addition. `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction. `None` when `rhs` exceeds `self`.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked sum of an amount sequence. `None` on overflow.
    pub fn sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
