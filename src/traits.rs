//! Core trait abstractions for fee quoting and configuration notifications.
//!
//! Router-like callers depend on [`FeeQuoter`] rather than on a concrete fee
//! engine, so the same routing code can quote against the in-memory
//! [`FeeManager`](crate::FeeManager) or against a deployed contract through
//! [`AlloyFeeQuoter`](crate::providers::AlloyFeeQuoter). Configuration changes
//! are published through [`FeeEventSink`], which tests replace with a
//! recording fake.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use fee_manager_rs::{FeeQuoter, FeeQuote, GrossQuote, Result};
//!
//! struct FreeQuoter;
//!
//! #[async_trait::async_trait]
//! impl FeeQuoter for FreeQuoter {
//!     async fn compute_fee(&self, _: Address, asset: Address, _: U256) -> Result<FeeQuote> {
//!         Ok(FeeQuote { fee_asset: asset, native_fee: U256::ZERO, asset_fee: U256::ZERO })
//!     }
//!
//!     async fn compute_gross_from_net(&self, _: Address, asset: Address, net: U256)
//!         -> Result<GrossQuote> {
//!         Ok(GrossQuote { fee_asset: asset, gross_amount: net })
//!     }
//! }
//! ```

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::error::Result;
use crate::manager::FeeManagerEvent;
use crate::protocol::{FeeQuote, GrossQuote};

/// Trait for answering fee questions on behalf of a router.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Routers quoting against unreachable fee sources
/// - Fee sources that disagree with the local schedule
/// - Zero-fee configurations
#[async_trait]
pub trait FeeQuoter: Send + Sync {
    /// Fee owed for transferring `amount` of `asset` on behalf of `integrator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee cannot be represented in 256 bits or the
    /// underlying source cannot be queried.
    async fn compute_fee(&self, integrator: Address, asset: Address, amount: U256)
        -> Result<FeeQuote>;

    /// Gross amount whose deducted fee leaves the recipient at least `net_amount`.
    ///
    /// # Errors
    ///
    /// Returns an error if no gross amount can net `net_amount` or the
    /// underlying source cannot be queried.
    async fn compute_gross_from_net(
        &self,
        integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote>;
}

/// Trait for delivering configuration-changed notifications to observers.
pub trait FeeEventSink: Send + Sync {
    fn publish(&self, event: &FeeManagerEvent);
}

impl<T: FeeEventSink + ?Sized> FeeEventSink for std::sync::Arc<T> {
    fn publish(&self, event: &FeeManagerEvent) {
        (**self).publish(event)
    }
}
