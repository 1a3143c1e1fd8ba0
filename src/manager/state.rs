//! Persisted configuration layout
//!
//! Two tables: one singleton platform record and one integrator-to-record map.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::protocol::FeeScheduleRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeManagerState {
    pub platform: FeeScheduleRecord,
    #[serde(default)]
    pub integrators: BTreeMap<Address, FeeScheduleRecord>,
}

impl FeeManagerState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
