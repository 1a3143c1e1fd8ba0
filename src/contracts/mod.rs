//! FeeManager contract bindings
//!
//! This module contains the Alloy-generated bindings for the deployed
//! FeeManager contract that routers consult before moving value.

pub mod fee_manager;
