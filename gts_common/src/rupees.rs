use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------       Rupees        ---------------------------------------------------------
/// An amount of Indian rupees, stored as an integer number of paise (1/100 ₹).
///
/// Payment providers report settled amounts in paise, so storing minor units end-to-end avoids any floating-point
/// bookkeeping. Negative values are permitted (debits are represented as negative deltas).
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Rupees(i64);

op!(binary Rupees, Add, add);
op!(binary Rupees, Sub, sub);
op!(inplace Rupees, SubAssign, sub_assign);
op!(unary Rupees, Neg, neg);

impl Mul<i64> for Rupees {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct RupeesConversionError(String);

impl From<i64> for Rupees {
    fn from(paise: i64) -> Self {
        Self(paise)
    }
}

impl TryFrom<u64> for Rupees {
    type Error = RupeesConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(RupeesConversionError(format!("Value {value} is too large to convert to Rupees")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl PartialEq for Rupees {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Rupees {}

impl Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "₹{}", self.0 / 100)
        } else {
            write!(f, "₹{:.2}", self.0 as f64 / 100.0)
        }
    }
}

impl Rupees {
    pub fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// The amount in paise.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// A flat percentage of the amount, truncated towards zero paise.
    pub fn percent(&self, pct: i64) -> Self {
        Self(self.0 * pct / 100)
    }
}
