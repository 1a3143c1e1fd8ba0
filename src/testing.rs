//! Test utilities and fake implementations for fee quoting
//!
//! This module provides fake implementations of the crate's traits so routers
//! and configuration tooling can be tested without a deployed contract,
//! including adversarial scenarios such as unreachable or inconsistent fee
//! sources.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::manager::FeeManagerEvent;
use crate::protocol::{FeeQuote, GrossQuote};
use crate::traits::{FeeEventSink, FeeQuoter};
use crate::{FeeManagerError, Result};

// ============================================================================
// Recording Event Sink
// ============================================================================

/// An event sink that keeps every published notification in memory.
///
/// Clones share the same log, so a test can hand one clone to a
/// [`FeeManager`](crate::FeeManager) and inspect another.
#[derive(Clone, Debug, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<FeeManagerEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications published so far, oldest first
    pub fn events(&self) -> Vec<FeeManagerEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl FeeEventSink for RecordingEventSink {
    fn publish(&self, event: &FeeManagerEvent) {
        self.events.lock().unwrap().push(*event);
    }
}

// ============================================================================
// Fake Fee Quoter
// ============================================================================

/// A fee quoter that answers from pre-configured tables.
///
/// This allows testing scenarios like:
/// - A fee source that is unreachable
/// - A fee source whose gross amount does not cover its own fee
/// - Fee-free assets
///
/// Assets without a configured answer quote zero fees and a gross amount
/// equal to the net amount.
#[derive(Clone, Debug, Default)]
pub struct FakeFeeQuoter {
    fees: Arc<Mutex<HashMap<Address, (U256, U256)>>>,
    gross_amounts: Arc<Mutex<HashMap<Address, U256>>>,
    failures: Arc<Mutex<Vec<Address>>>,
    call_count: Arc<Mutex<usize>>,
}

impl FakeFeeQuoter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the `(native_fee, asset_fee)` returned for `asset`
    pub fn set_fee(&self, asset: Address, native_fee: U256, asset_fee: U256) {
        self.fees
            .lock()
            .unwrap()
            .insert(asset, (native_fee, asset_fee));
    }

    /// Configure the gross amount returned for `asset`, whatever the net amount
    pub fn set_gross_amount(&self, asset: Address, gross_amount: U256) {
        self.gross_amounts
            .lock()
            .unwrap()
            .insert(asset, gross_amount);
    }

    /// Configure every query for `asset` to fail
    pub fn add_failure(&self, asset: Address) {
        self.failures.lock().unwrap().push(asset);
    }

    /// Number of queries answered or failed so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn begin_call(&self, asset: Address) -> Result<()> {
        *self.call_count.lock().unwrap() += 1;
        if self.failures.lock().unwrap().contains(&asset) {
            return Err(FeeManagerError::Provider(
                "Simulated fee source error".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FeeQuoter for FakeFeeQuoter {
    async fn compute_fee(
        &self,
        _integrator: Address,
        asset: Address,
        _amount: U256,
    ) -> Result<FeeQuote> {
        self.begin_call(asset)?;
        let (native_fee, asset_fee) = self
            .fees
            .lock()
            .unwrap()
            .get(&asset)
            .copied()
            .unwrap_or((U256::ZERO, U256::ZERO));

        Ok(FeeQuote {
            fee_asset: asset,
            native_fee,
            asset_fee,
        })
    }

    async fn compute_gross_from_net(
        &self,
        _integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote> {
        self.begin_call(asset)?;
        let gross_amount = self
            .gross_amounts
            .lock()
            .unwrap()
            .get(&asset)
            .copied()
            .unwrap_or(net_amount);

        Ok(GrossQuote {
            fee_asset: asset,
            gross_amount,
        })
    }
}
