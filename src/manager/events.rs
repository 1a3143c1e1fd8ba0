//! Configuration-changed notifications
//!
//! Every successful owner operation produces one [`FeeManagerEvent`], carrying
//! the full new values so off-chain observers and auditors never have to read
//! the manager back.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::protocol::FeeScheduleRecord;
use crate::traits::FeeEventSink;

/// Which configuration table a schedule change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeScope {
    Platform,
    Integrator(Address),
}

impl FeeScope {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Integrator(_) => "integrator",
        }
    }

    pub const fn integrator(&self) -> Option<Address> {
        match self {
            Self::Platform => None,
            Self::Integrator(integrator) => Some(*integrator),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleChanged {
    pub scope: FeeScope,
    pub schedule: FeeScheduleRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Notification emitted by a successful configuration operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeeManagerEvent {
    FeeScheduleChanged(FeeScheduleChanged),
    OwnershipTransferred(OwnershipTransferred),
}

impl FeeManagerEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FeeScheduleChanged(_) => "fee_schedule_changed",
            Self::OwnershipTransferred(_) => "ownership_transferred",
        }
    }
}

impl From<FeeScheduleChanged> for FeeManagerEvent {
    fn from(event: FeeScheduleChanged) -> Self {
        Self::FeeScheduleChanged(event)
    }
}

impl From<OwnershipTransferred> for FeeManagerEvent {
    fn from(event: OwnershipTransferred) -> Self {
        Self::OwnershipTransferred(event)
    }
}

/// Default sink: every notification becomes a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl FeeEventSink for TracingEventSink {
    fn publish(&self, event: &FeeManagerEvent) {
        match event {
            FeeManagerEvent::FeeScheduleChanged(changed) => {
                info!(
                    scope = changed.scope.name(),
                    integrator = ?changed.scope.integrator(),
                    fee_type = changed.schedule.fee_type.name(),
                    native_fee_component = %changed.schedule.native_fee_component,
                    token_fee_component = %changed.schedule.token_fee_component,
                    event = event.name()
                );
            }
            FeeManagerEvent::OwnershipTransferred(transferred) => {
                info!(
                    previous_owner = %transferred.previous_owner,
                    new_owner = %transferred.new_owner,
                    event = event.name()
                );
            }
        }
    }
}
