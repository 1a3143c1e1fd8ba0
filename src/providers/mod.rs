//! Production implementations of the fee quoting trait.
//!
//! The in-memory [`FeeManager`](crate::FeeManager) implements
//! [`FeeQuoter`](crate::traits::FeeQuoter) directly; this module provides the
//! adapter that answers the same questions from a deployed contract.

mod alloy;

pub use self::alloy::AlloyFeeQuoter;
