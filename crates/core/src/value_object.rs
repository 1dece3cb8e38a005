//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A monetary amount in minor units (cents).
///
/// Amounts are exact integers; there is no currency dimension because every
/// pay record is kept in the organization's single reporting currency.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("amount overflow"))
    }

    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("amount overflow"))
    }

    /// Arithmetic mean, rounded half away from zero. `None` for an empty input.
    pub fn average<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        let (sum, count) = amounts
            .into_iter()
            .fold((0i128, 0i128), |(sum, count), m| (sum + i128::from(m.0), count + 1));
        if count == 0 {
            return None;
        }
        let half = count / 2;
        let rounded = if sum >= 0 {
            (sum + half) / count
        } else {
            (sum - half) / count
        };
        Some(Money(rounded as i64))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
