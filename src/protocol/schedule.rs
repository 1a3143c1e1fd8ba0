//! Fee schedules
//!
//! A [`FeeSchedule`] carries two components: one charged in the chain's native
//! currency and one charged in the transferred asset. Both share the same
//! [`FeeType`], which is why the schedule is a tagged variant rather than a
//! pair of integers reinterpreted by a flag.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::basis_points::{gross_for_net_ratio, BasisPoints};
use super::fee_type::FeeType;
use crate::error::{FeeManagerError, Result};

/// Which leg of a schedule reduces the transferred amount
///
/// For an ERC20 transfer only the token component is taken out of the asset;
/// the native component is paid on top in native currency. For a native
/// transfer both components collapse into the native amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductionLeg {
    Token,
    Native,
}

/// A platform or integrator fee schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeSchedule {
    /// Constant amounts charged regardless of the transferred amount
    Fixed { native: U256, token: U256 },
    /// Basis points of the transferred amount
    Ratio {
        native: BasisPoints,
        token: BasisPoints,
    },
}

impl Default for FeeSchedule {
    /// No fee at all
    fn default() -> Self {
        Self::Fixed {
            native: U256::ZERO,
            token: U256::ZERO,
        }
    }
}

impl FeeSchedule {
    /// Builds a schedule from raw configuration values
    ///
    /// # Errors
    ///
    /// Returns [`FeeManagerError::InvalidRatio`] when `fee_type` is
    /// [`FeeType::Ratio`] and either component exceeds 10000 basis points.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fee_manager_rs::{FeeSchedule, FeeType};
    /// use alloy_primitives::U256;
    ///
    /// let schedule = FeeSchedule::new(FeeType::Ratio, U256::from(30), U256::from(100)).unwrap();
    /// assert_eq!(schedule.fee_type(), FeeType::Ratio);
    /// assert!(FeeSchedule::new(FeeType::Ratio, U256::ZERO, U256::from(10_001)).is_err());
    /// ```
    pub fn new(fee_type: FeeType, native: U256, token: U256) -> Result<Self> {
        match fee_type {
            FeeType::Fixed => Ok(Self::Fixed { native, token }),
            FeeType::Ratio => Ok(Self::Ratio {
                native: BasisPoints::from_component(native, "native")?,
                token: BasisPoints::from_component(token, "token")?,
            }),
        }
    }

    pub fn fixed(native: U256, token: U256) -> Self {
        Self::Fixed { native, token }
    }

    pub fn ratio(native: BasisPoints, token: BasisPoints) -> Self {
        Self::Ratio { native, token }
    }

    pub fn fee_type(&self) -> FeeType {
        match self {
            Self::Fixed { .. } => FeeType::Fixed,
            Self::Ratio { .. } => FeeType::Ratio,
        }
    }

    /// Raw configured native component (an amount or basis points)
    pub fn native_component(&self) -> U256 {
        match self {
            Self::Fixed { native, .. } => *native,
            Self::Ratio { native, .. } => native.to_u256(),
        }
    }

    /// Raw configured token component (an amount or basis points)
    pub fn token_component(&self) -> U256 {
        match self {
            Self::Fixed { token, .. } => *token,
            Self::Ratio { token, .. } => token.to_u256(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.native_component().is_zero() && self.token_component().is_zero()
    }

    /// Native component fee for `amount`
    pub fn native_component_fee(&self, amount: U256) -> U256 {
        match self {
            Self::Fixed { native, .. } => *native,
            Self::Ratio { native, .. } => native.apply(amount),
        }
    }

    /// Token component fee for `amount`
    pub fn token_component_fee(&self, amount: U256) -> U256 {
        match self {
            Self::Fixed { token, .. } => *token,
            Self::Ratio { token, .. } => token.apply(amount),
        }
    }

    /// Fee taken out of the transferred amount itself
    pub fn deducted_fee(&self, leg: DeductionLeg, amount: U256) -> Result<U256> {
        match leg {
            DeductionLeg::Token => Ok(self.token_component_fee(amount)),
            DeductionLeg::Native => self
                .native_component_fee(amount)
                .checked_add(self.token_component_fee(amount))
                .ok_or(FeeManagerError::ArithmeticOverflow {
                    operation: "native_fee",
                }),
        }
    }

    /// Smallest gross amount that leaves at least `net` after the deducted fee
    pub fn gross_for_net(&self, leg: DeductionLeg, net: U256) -> Result<U256> {
        match self {
            Self::Fixed { .. } => {
                let fee = self.deducted_fee(leg, net)?;
                net.checked_add(fee)
                    .ok_or(FeeManagerError::ArithmeticOverflow {
                        operation: "gross_for_net_fixed",
                    })
            }
            Self::Ratio { native, token } => {
                let ratio = match leg {
                    DeductionLeg::Token => u32::from(token.get()),
                    DeductionLeg::Native => u32::from(native.get()) + u32::from(token.get()),
                };
                gross_for_net_ratio(net, ratio, |gross| self.deducted_fee(leg, gross))
            }
        }
    }

    /// Persisted representation
    pub fn record(&self) -> FeeScheduleRecord {
        FeeScheduleRecord {
            fee_type: self.fee_type(),
            native_fee_component: self.native_component(),
            token_fee_component: self.token_component(),
        }
    }
}

/// Flat `{fee_type, native, token}` record, as stored and as emitted to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeScheduleRecord {
    pub fee_type: FeeType,
    pub native_fee_component: U256,
    pub token_fee_component: U256,
}

impl TryFrom<FeeScheduleRecord> for FeeSchedule {
    type Error = FeeManagerError;

    fn try_from(record: FeeScheduleRecord) -> Result<Self> {
        Self::new(
            record.fee_type,
            record.native_fee_component,
            record.token_fee_component,
        )
    }
}

impl From<FeeSchedule> for FeeScheduleRecord {
    fn from(schedule: FeeSchedule) -> Self {
        schedule.record()
    }
}
