//! Fee protocol types and definitions
//!
//! This module contains the core fee-model types: calculation modes, basis
//! point ratios, fee schedules, and the quotes produced from them.

mod basis_points;
mod fee_type;
mod quote;
mod schedule;

pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use fee_type::{FeeType, InvalidFeeType};
pub use quote::{FeeQuote, GrossQuote, NATIVE_ASSET};
pub use schedule::{DeductionLeg, FeeSchedule, FeeScheduleRecord};
