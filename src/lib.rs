//! # fee-manager-rs
//!
//! Two-tier fee model for value-transfer routers: one platform-wide default
//! fee schedule plus optional per-integrator overrides, each either a FIXED
//! pair of amounts or a RATIO pair in basis points.
//!
//! ## Quick Start
//!
//! ```rust
//! use fee_manager_rs::{FeeManager, FeeManagerError, FeeType, NATIVE_ASSET};
//! use alloy_primitives::{address, U256};
//!
//! # fn example() -> Result<(), FeeManagerError> {
//! let owner = address!("00000000000000000000000000000000000000aa");
//! let integrator = address!("00000000000000000000000000000000000000cc");
//! let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
//!
//! let mut manager = FeeManager::new(owner);
//! manager.set_platform_fee_schedule(owner, FeeType::Fixed, U256::from(1_000), U256::from(10_000))?;
//! manager.set_integrator_fee_schedule(owner, integrator, FeeType::Ratio, U256::ZERO, U256::from(100))?;
//!
//! // Forward: fee owed on an amount
//! let fee = manager.compute_fee(integrator, usdc, U256::from(10_000))?;
//! assert_eq!(fee.asset_fee, U256::from(100));
//!
//! // Inverse: gross amount so the recipient nets at least 10_000
//! let gross = manager.compute_gross_from_net(integrator, usdc, U256::from(10_000))?;
//! assert_eq!(gross.gross_amount, U256::from(10_101));
//!
//! // Native transfers pay both components in native currency
//! let native = manager.compute_fee(owner, NATIVE_ASSET, U256::from(90_000))?;
//! assert_eq!(native.native_fee, U256::from(11_000));
//! # Ok(())
//! # }
//! ```
//!
//! ## Deployed Contract Access
//!
//! ```rust,no_run
//! use fee_manager_rs::{ContractConfig, FeeQuoter};
//! use fee_manager_rs::providers::AlloyFeeQuoter;
//! use alloy_primitives::{Address, U256};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let quoter = AlloyFeeQuoter::from_config(&ContractConfig::from_env()?);
//! let fee = quoter.compute_fee(Address::ZERO, Address::ZERO, U256::from(1_000)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`FeeManager`] - In-memory fee engine with owner-gated configuration
//! - [`FeeSchedule`], [`FeeType`] and [`BasisPoints`] - Schedule types
//! - [`FeeQuote`] and [`GrossQuote`] - Query results
//! - [`FeeQuoter`] and [`FeeEventSink`] - Trait seams for routers and observers
//! - [`FeeManagerContract`] - Wrapper for the deployed contract
//! - [`FeeManagerConfig`] and [`ContractConfig`] - Configuration loading
//! - [`FeeManagerError`] and [`Result`] - Error types

mod config;
mod contracts;
mod error;
mod manager;
mod protocol;
mod traits;

pub use config::{ContractConfig, FeeManagerConfig, IntegratorConfig, ScheduleConfig};
pub use contracts::fee_manager::FeeManagerContract;
pub use error::{FeeManagerError, Result};
pub use manager::{
    FeeManager, FeeManagerEvent, FeeManagerState, FeeScheduleChanged, FeeScope,
    OwnershipTransferred, TracingEventSink,
};
pub use protocol::{
    BasisPoints, DeductionLeg, FeeQuote, FeeSchedule, FeeScheduleRecord, FeeType, GrossQuote,
    InvalidFeeType, BPS_DENOMINATOR, NATIVE_ASSET,
};
pub use traits::{FeeEventSink, FeeQuoter};
pub use transfer::{QuoteRequest, TransferQuote};

pub mod providers;
pub mod testing;
pub mod transfer;

// Public module for advanced users who need custom instrumentation
pub mod spans;
