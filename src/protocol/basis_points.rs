//! Basis point ratios and the exact integer arithmetic built on them
//!
//! All ratio math floors in the forward direction (fee from amount) and is
//! inverted exactly in the backward direction (gross amount from net amount),
//! so a quoted gross amount never nets the recipient less than requested.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FeeManagerError, Result};

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u16 = 10_000;

/// A ratio in basis points, guaranteed to be at most [`BPS_DENOMINATOR`]
///
/// # Example
///
/// ```rust
/// use fee_manager_rs::BasisPoints;
/// use alloy_primitives::U256;
///
/// let one_percent = BasisPoints::new(100).unwrap();
/// assert_eq!(one_percent.apply(U256::from(10_000)), U256::from(100));
/// assert!(BasisPoints::new(10_001).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(BPS_DENOMINATOR);

    /// Returns `None` when `bps` exceeds the denominator
    #[inline]
    pub const fn new(bps: u16) -> Option<Self> {
        if bps > BPS_DENOMINATOR {
            None
        } else {
            Some(Self(bps))
        }
    }

    /// Validates a raw configuration component
    ///
    /// `component` names the schedule field in the resulting
    /// [`FeeManagerError::InvalidRatio`].
    pub fn from_component(value: U256, component: &'static str) -> Result<Self> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(FeeManagerError::InvalidRatio { component, value })
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn to_u256(self) -> U256 {
        U256::from(self.0)
    }

    /// Computes `floor(amount * self / 10000)`
    ///
    /// Evaluated as `(amount / D) * r + (amount % D) * r / D`, which is exact
    /// and cannot overflow for `r <= D`.
    pub fn apply(self, amount: U256) -> U256 {
        let denominator = U256::from(BPS_DENOMINATOR);
        let ratio = self.to_u256();
        let whole = amount / denominator * ratio;
        let remainder = amount % denominator * ratio / denominator;
        whole + remainder
    }
}

impl<'de> Deserialize<'de> for BasisPoints {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u16::deserialize(deserializer)?;
        Self::new(raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "{raw} basis points exceeds denominator {BPS_DENOMINATOR}"
            ))
        })
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

/// Smallest gross amount whose ratio fee leaves at least `net`
///
/// `ratio` is the total basis points deducted from the gross amount; it may
/// exceed a single [`BasisPoints`] when several ratio legs are deducted from
/// the same asset. `deducted` is the exact forward fee function.
///
/// With one floored leg the answer is the closed form
/// `floor((net - 1) * D / (D - r)) + 1`. Each extra leg floors separately, so
/// the real fee can sit up to one unit below the combined-ratio fee and the
/// closed form is only an upper bound. The same closed form at `net - 1` is a
/// lower bound, and the answer is found by checking `deducted` across that
/// window, which spans at most `D / (D - r) + 1` amounts.
pub(crate) fn gross_for_net_ratio<F>(net: U256, ratio: u32, deducted: F) -> Result<U256>
where
    F: Fn(U256) -> Result<U256>,
{
    if net.is_zero() {
        return Ok(U256::ZERO);
    }
    let kept_by = |gross: U256| -> Result<U256> { Ok(gross.saturating_sub(deducted(gross)?)) };
    let overflow = || FeeManagerError::ArithmeticOverflow {
        operation: "gross_for_net_ratio",
    };

    let denominator = u32::from(BPS_DENOMINATOR);
    if ratio >= denominator {
        // no gross amount keeps more than one unit; a gross of one keeps it
        // only when every leg floors to zero
        let one = U256::from(1);
        if net == one && kept_by(one)? >= net {
            return Ok(one);
        }
        return Err(FeeManagerError::NetAmountUnreachable { net_amount: net });
    }

    let kept_ratio = U256::from(denominator - ratio);
    let first_keeping = |target: U256| -> Option<U256> {
        if target.is_zero() {
            return Some(U256::ZERO);
        }
        (target - U256::from(1))
            .checked_mul(U256::from(denominator))
            .map(|scaled| scaled / kept_ratio)
            .and_then(|floor| floor.checked_add(U256::from(1)))
    };

    let mut gross = first_keeping(net - U256::from(1)).ok_or_else(overflow)?;
    let upper = first_keeping(net).unwrap_or(U256::MAX);
    loop {
        if kept_by(gross)? >= net {
            return Ok(gross);
        }
        if gross >= upper {
            return Err(overflow());
        }
        gross += U256::from(1);
    }
}
