//! The in-memory fee engine
//!
//! [`FeeManager`] owns the platform schedule and the integrator override
//! table. Configuration operations take `&mut self` and an explicit `caller`,
//! and are all-or-nothing: every check runs before anything is written.
//! Queries take `&self` and are pure functions of the current configuration.

mod events;
mod state;

pub use events::{
    FeeManagerEvent, FeeScheduleChanged, FeeScope, OwnershipTransferred, TracingEventSink,
};
pub use state::FeeManagerState;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::FeeManagerConfig;
use crate::error::{FeeManagerError, Result};
use crate::protocol::{
    DeductionLeg, FeeQuote, FeeSchedule, FeeScheduleRecord, FeeType, GrossQuote, NATIVE_ASSET,
};
use crate::spans;
use crate::traits::{FeeEventSink, FeeQuoter};

/// Two-tier fee engine: a platform default plus per-integrator overrides
///
/// # Example
///
/// ```rust
/// use fee_manager_rs::{FeeManager, FeeType, NATIVE_ASSET};
/// use alloy_primitives::{address, Address, U256};
///
/// # fn example() -> fee_manager_rs::Result<()> {
/// let owner = address!("00000000000000000000000000000000000000aa");
/// let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
///
/// let mut manager = FeeManager::new(owner);
/// manager.set_platform_fee_schedule(owner, FeeType::Fixed, U256::from(1_000), U256::from(10_000))?;
///
/// let quote = manager.compute_fee(Address::ZERO, usdc, U256::from(90_000))?;
/// assert_eq!(quote.native_fee, U256::from(1_000));
/// assert_eq!(quote.asset_fee, U256::from(10_000));
///
/// let native = manager.compute_fee(Address::ZERO, NATIVE_ASSET, U256::from(90_000))?;
/// assert_eq!(native.native_fee, U256::from(11_000));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FeeManager<S = TracingEventSink> {
    owner: Address,
    platform: FeeSchedule,
    integrators: BTreeMap<Address, FeeSchedule>,
    event_sink: S,
}

impl FeeManager {
    /// Creates a manager with no fees configured, publishing to `tracing`
    pub fn new(owner: Address) -> Self {
        Self::with_event_sink(owner, TracingEventSink)
    }

    /// Rebuilds a manager from its persisted tables
    pub fn restore(owner: Address, state: FeeManagerState) -> Result<Self> {
        Self::restore_with_event_sink(owner, state, TracingEventSink)
    }

    /// Builds a manager from a configuration document
    ///
    /// The schedules are applied through the owner operations, so every
    /// seeded schedule is validated and announced like a live update.
    pub fn from_config(config: &FeeManagerConfig) -> Result<Self> {
        Self::from_config_with_event_sink(config, TracingEventSink)
    }
}

impl<S: FeeEventSink> FeeManager<S> {
    pub fn with_event_sink(owner: Address, event_sink: S) -> Self {
        debug!(
            owner = %owner,
            event = "fee_manager_initialized"
        );
        Self {
            owner,
            platform: FeeSchedule::default(),
            integrators: BTreeMap::new(),
            event_sink,
        }
    }

    pub fn restore_with_event_sink(
        owner: Address,
        state: FeeManagerState,
        event_sink: S,
    ) -> Result<Self> {
        let platform = FeeSchedule::try_from(state.platform)?;
        let integrators = state
            .integrators
            .into_iter()
            .map(|(integrator, record)| {
                if integrator == Address::ZERO {
                    return Err(FeeManagerError::ZeroAddress {
                        field: "integrator",
                    });
                }
                Ok((integrator, FeeSchedule::try_from(record)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!(
            owner = %owner,
            integrator_count = integrators.len(),
            event = "fee_manager_restored"
        );

        Ok(Self {
            owner,
            platform,
            integrators,
            event_sink,
        })
    }

    pub fn from_config_with_event_sink(config: &FeeManagerConfig, event_sink: S) -> Result<Self> {
        let owner = config.owner;
        let mut manager = Self::with_event_sink(owner, event_sink);

        manager.set_platform_fee_schedule(
            owner,
            config.platform.fee_type,
            config.platform.native_fee,
            config.platform.token_fee,
        )?;
        for integrator in &config.integrators {
            manager.set_integrator_fee_schedule(
                owner,
                integrator.integrator,
                integrator.schedule.fee_type,
                integrator.schedule.native_fee,
                integrator.schedule.token_fee,
            )?;
        }

        Ok(manager)
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn platform_fee_schedule(&self) -> &FeeSchedule {
        &self.platform
    }

    pub fn integrator_fee_schedule(&self, integrator: Address) -> Option<&FeeSchedule> {
        self.integrators.get(&integrator)
    }

    pub fn integrator_count(&self) -> usize {
        self.integrators.len()
    }

    pub fn event_sink(&self) -> &S {
        &self.event_sink
    }

    /// Schedule that applies to `integrator`: its override, else the platform default
    pub fn resolve_schedule(&self, integrator: Address) -> &FeeSchedule {
        self.integrators.get(&integrator).unwrap_or(&self.platform)
    }

    fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            warn!(
                caller = %caller,
                owner = %self.owner,
                event = "unauthorized_configuration_attempt"
            );
            return Err(FeeManagerError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Replaces the platform default schedule
    ///
    /// # Errors
    ///
    /// - [`FeeManagerError::Unauthorized`] if `caller` is not the owner
    /// - [`FeeManagerError::InvalidRatio`] if a ratio component exceeds 10000
    pub fn set_platform_fee_schedule(
        &mut self,
        caller: Address,
        fee_type: FeeType,
        native_component: U256,
        token_component: U256,
    ) -> Result<FeeScheduleChanged> {
        let span = spans::set_fee_schedule(
            FeeScope::Platform.name(),
            &caller,
            None,
            fee_type,
            &native_component,
            &token_component,
        );
        let _guard = span.enter();

        let schedule = self
            .ensure_owner(caller)
            .and_then(|()| FeeSchedule::new(fee_type, native_component, token_component))
            .inspect_err(spans::record_error)?;

        self.platform = schedule;
        Ok(self.announce(FeeScope::Platform, schedule.record()))
    }

    /// Inserts or overwrites the override for `integrator`
    ///
    /// # Errors
    ///
    /// - [`FeeManagerError::Unauthorized`] if `caller` is not the owner
    /// - [`FeeManagerError::ZeroAddress`] if `integrator` is the zero address
    /// - [`FeeManagerError::InvalidRatio`] if a ratio component exceeds 10000
    pub fn set_integrator_fee_schedule(
        &mut self,
        caller: Address,
        integrator: Address,
        fee_type: FeeType,
        native_component: U256,
        token_component: U256,
    ) -> Result<FeeScheduleChanged> {
        let span = spans::set_fee_schedule(
            FeeScope::Integrator(integrator).name(),
            &caller,
            Some(&integrator),
            fee_type,
            &native_component,
            &token_component,
        );
        let _guard = span.enter();

        let schedule = self
            .ensure_owner(caller)
            .and_then(|()| {
                if integrator == Address::ZERO {
                    return Err(FeeManagerError::ZeroAddress {
                        field: "integrator",
                    });
                }
                FeeSchedule::new(fee_type, native_component, token_component)
            })
            .inspect_err(spans::record_error)?;

        self.integrators.insert(integrator, schedule);
        Ok(self.announce(FeeScope::Integrator(integrator), schedule.record()))
    }

    /// Hands the owner role to `new_owner`
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<OwnershipTransferred> {
        let span = spans::transfer_ownership(&caller, &new_owner);
        let _guard = span.enter();

        self.ensure_owner(caller)
            .and_then(|()| {
                if new_owner == Address::ZERO {
                    return Err(FeeManagerError::ZeroAddress { field: "new_owner" });
                }
                Ok(())
            })
            .inspect_err(spans::record_error)?;

        let transferred = OwnershipTransferred {
            previous_owner: self.owner,
            new_owner,
        };
        self.owner = new_owner;
        self.event_sink.publish(&transferred.into());
        Ok(transferred)
    }

    fn announce(&self, scope: FeeScope, schedule: FeeScheduleRecord) -> FeeScheduleChanged {
        let changed = FeeScheduleChanged { scope, schedule };
        self.event_sink.publish(&changed.into());
        changed
    }

    /// Fee owed for transferring `amount` of `asset` on behalf of `integrator`
    ///
    /// For the native asset both components are charged in native currency;
    /// for an ERC20 the token component is charged in the asset itself.
    pub fn compute_fee(&self, integrator: Address, asset: Address, amount: U256) -> Result<FeeQuote> {
        let span = spans::compute_fee(&integrator, &asset, &amount);
        let _guard = span.enter();

        let schedule = self.resolve_schedule(integrator);
        let quote = if asset == NATIVE_ASSET {
            FeeQuote {
                fee_asset: NATIVE_ASSET,
                native_fee: schedule
                    .deducted_fee(DeductionLeg::Native, amount)
                    .inspect_err(spans::record_error)?,
                asset_fee: U256::ZERO,
            }
        } else {
            FeeQuote {
                fee_asset: asset,
                native_fee: schedule.native_component_fee(amount),
                asset_fee: schedule.token_component_fee(amount),
            }
        };

        debug!(
            integrator = %integrator,
            asset = %asset,
            amount = %amount,
            fee_type = schedule.fee_type().name(),
            native_fee = %quote.native_fee,
            asset_fee = %quote.asset_fee,
            event = "fee_computed"
        );

        Ok(quote)
    }

    /// Smallest gross amount whose deducted fee leaves at least `net_amount`
    ///
    /// Native-only fee legs of an ERC20 transfer are paid on top in native
    /// currency and do not affect the gross asset amount.
    pub fn compute_gross_from_net(
        &self,
        integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote> {
        let span = spans::compute_gross_from_net(&integrator, &asset, &net_amount);
        let _guard = span.enter();

        let schedule = self.resolve_schedule(integrator);
        let leg = if asset == NATIVE_ASSET {
            DeductionLeg::Native
        } else {
            DeductionLeg::Token
        };
        let gross_amount = schedule
            .gross_for_net(leg, net_amount)
            .inspect_err(spans::record_error)?;

        debug!(
            integrator = %integrator,
            asset = %asset,
            net_amount = %net_amount,
            gross_amount = %gross_amount,
            event = "gross_amount_computed"
        );

        Ok(GrossQuote {
            fee_asset: asset,
            gross_amount,
        })
    }

    /// Persisted form of both configuration tables
    pub fn snapshot(&self) -> FeeManagerState {
        FeeManagerState {
            platform: self.platform.record(),
            integrators: self
                .integrators
                .iter()
                .map(|(integrator, schedule)| (*integrator, schedule.record()))
                .collect(),
        }
    }
}

#[async_trait]
impl<S: FeeEventSink> FeeQuoter for FeeManager<S> {
    async fn compute_fee(
        &self,
        integrator: Address,
        asset: Address,
        amount: U256,
    ) -> Result<FeeQuote> {
        Self::compute_fee(self, integrator, asset, amount)
    }

    async fn compute_gross_from_net(
        &self,
        integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote> {
        Self::compute_gross_from_net(self, integrator, asset, net_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::BasisPoints;
    use crate::testing::RecordingEventSink;
    use alloy_primitives::address;
    use rstest::rstest;

    const OWNER: Address = address!("00000000000000000000000000000000000000aa");
    const OTHER: Address = address!("00000000000000000000000000000000000000bb");
    const INTEGRATOR: Address = address!("00000000000000000000000000000000000000cc");
    const TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    fn manager() -> FeeManager<RecordingEventSink> {
        FeeManager::with_event_sink(OWNER, RecordingEventSink::new())
    }

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_unconfigured_manager_charges_nothing() {
        let manager = manager();
        let quote = manager.compute_fee(OTHER, TOKEN, u(90_000)).unwrap();
        assert_eq!(quote.native_fee, U256::ZERO);
        assert_eq!(quote.asset_fee, U256::ZERO);

        let gross = manager.compute_gross_from_net(OTHER, TOKEN, u(90_000)).unwrap();
        assert_eq!(gross.gross_amount, u(90_000));
    }

    #[test]
    fn test_fixed_platform_schedule() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(1_000), u(10_000))
            .unwrap();

        let quote = manager.compute_fee(OTHER, TOKEN, u(90_000)).unwrap();
        assert_eq!(
            quote,
            FeeQuote {
                fee_asset: TOKEN,
                native_fee: u(1_000),
                asset_fee: u(10_000),
            }
        );

        let native = manager.compute_fee(OTHER, NATIVE_ASSET, u(90_000)).unwrap();
        assert_eq!(
            native,
            FeeQuote {
                fee_asset: NATIVE_ASSET,
                native_fee: u(11_000),
                asset_fee: U256::ZERO,
            }
        );
    }

    #[test]
    fn test_ratio_platform_schedule() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Ratio, u(10_000), u(1_000))
            .unwrap();

        let quote = manager.compute_fee(OTHER, TOKEN, u(90_000)).unwrap();
        assert_eq!(quote.asset_fee, u(9_000));
        assert_eq!(quote.native_fee, u(90_000));
    }

    #[rstest]
    #[case(FeeType::Ratio, 10_001, 0, "native")]
    #[case(FeeType::Ratio, 0, 10_001, "token")]
    fn test_invalid_ratio_leaves_platform_unchanged(
        #[case] fee_type: FeeType,
        #[case] native: u64,
        #[case] token: u64,
        #[case] component: &str,
    ) {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(5), u(6))
            .unwrap();

        let err = manager
            .set_platform_fee_schedule(OWNER, fee_type, u(native), u(token))
            .unwrap_err();
        match err {
            FeeManagerError::InvalidRatio { component: c, .. } => assert_eq!(c, component),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            *manager.platform_fee_schedule(),
            FeeSchedule::fixed(u(5), u(6))
        );
        assert_eq!(manager.event_sink().len(), 1);
    }

    #[test]
    fn test_non_owner_rejected_on_every_configuration_path() {
        let mut manager = manager();

        let err = manager
            .set_platform_fee_schedule(OTHER, FeeType::Fixed, u(1), u(1))
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::Unauthorized { caller } if caller == OTHER));

        let err = manager
            .set_integrator_fee_schedule(OTHER, INTEGRATOR, FeeType::Fixed, u(1), u(1))
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::Unauthorized { .. }));

        let err = manager.transfer_ownership(OTHER, OTHER).unwrap_err();
        assert!(matches!(err, FeeManagerError::Unauthorized { .. }));

        assert!(manager.event_sink().is_empty());
        assert_eq!(manager.integrator_count(), 0);
        assert_eq!(manager.owner(), OWNER);
    }

    #[test]
    fn test_authorization_checked_before_arguments() {
        let mut manager = manager();
        let err = manager
            .set_integrator_fee_schedule(OTHER, Address::ZERO, FeeType::Ratio, u(20_000), u(0))
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::Unauthorized { .. }));
    }

    #[test]
    fn test_zero_integrator_rejected() {
        let mut manager = manager();
        let err = manager
            .set_integrator_fee_schedule(OWNER, Address::ZERO, FeeType::Fixed, u(1), u(1))
            .unwrap_err();
        assert!(matches!(
            err,
            FeeManagerError::ZeroAddress {
                field: "integrator"
            }
        ));
        assert_eq!(manager.integrator_count(), 0);
    }

    #[test]
    fn test_integrator_invalid_ratio_keeps_previous_override() {
        let mut manager = manager();
        manager
            .set_integrator_fee_schedule(OWNER, INTEGRATOR, FeeType::Ratio, u(0), u(100))
            .unwrap();
        let err = manager
            .set_integrator_fee_schedule(OWNER, INTEGRATOR, FeeType::Ratio, u(0), u(10_001))
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::InvalidRatio { .. }));
        assert_eq!(
            manager.integrator_fee_schedule(INTEGRATOR),
            Some(&FeeSchedule::ratio(
                BasisPoints::ZERO,
                BasisPoints::new(100).unwrap()
            ))
        );
    }

    #[test]
    fn test_override_shadows_platform_even_after_platform_changes() {
        let mut manager = manager();
        manager
            .set_integrator_fee_schedule(OWNER, INTEGRATOR, FeeType::Ratio, u(0), u(100))
            .unwrap();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(777), u(888))
            .unwrap();

        let quote = manager.compute_fee(INTEGRATOR, TOKEN, u(10_000)).unwrap();
        assert_eq!(quote.asset_fee, u(100));
        assert_eq!(quote.native_fee, U256::ZERO);

        let gross = manager
            .compute_gross_from_net(INTEGRATOR, TOKEN, u(10_000))
            .unwrap();
        assert_eq!(gross.gross_amount, u(10_101));
        assert_eq!(gross.fee_asset, TOKEN);

        let platform_quote = manager.compute_fee(OTHER, TOKEN, u(10_000)).unwrap();
        assert_eq!(platform_quote.native_fee, u(777));
        assert_eq!(platform_quote.asset_fee, u(888));
    }

    #[test]
    fn test_gross_from_net_native_fixed_includes_both_components() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(1_000), u(10_000))
            .unwrap();
        let gross = manager
            .compute_gross_from_net(OTHER, NATIVE_ASSET, u(90_000))
            .unwrap();
        assert_eq!(gross.gross_amount, u(101_000));
        assert_eq!(gross.fee_asset, NATIVE_ASSET);
    }

    #[test]
    fn test_gross_from_net_erc20_ignores_native_leg() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Ratio, u(5_000), u(100))
            .unwrap();
        let gross = manager
            .compute_gross_from_net(OTHER, TOKEN, u(10_000))
            .unwrap();
        assert_eq!(gross.gross_amount, u(10_101));
    }

    #[test]
    fn test_events_carry_new_values() {
        let mut manager = manager();
        let changed = manager
            .set_integrator_fee_schedule(OWNER, INTEGRATOR, FeeType::Ratio, u(25), u(50))
            .unwrap();
        assert_eq!(changed.scope, FeeScope::Integrator(INTEGRATOR));
        assert_eq!(changed.schedule.token_fee_component, u(50));

        let events = manager.event_sink().events();
        assert_eq!(events, vec![FeeManagerEvent::FeeScheduleChanged(changed)]);
    }

    #[test]
    fn test_transfer_ownership() {
        let mut manager = manager();
        let err = manager
            .transfer_ownership(OWNER, Address::ZERO)
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::ZeroAddress { field: "new_owner" }));

        let transferred = manager.transfer_ownership(OWNER, OTHER).unwrap();
        assert_eq!(transferred.previous_owner, OWNER);
        assert_eq!(manager.owner(), OTHER);

        assert!(manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(1), u(1))
            .is_err());
        assert!(manager
            .set_platform_fee_schedule(OTHER, FeeType::Fixed, u(1), u(1))
            .is_ok());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, u(1_000), u(10_000))
            .unwrap();
        manager
            .set_integrator_fee_schedule(OWNER, INTEGRATOR, FeeType::Ratio, u(0), u(100))
            .unwrap();

        let restored = FeeManager::restore(OWNER, manager.snapshot()).unwrap();
        assert_eq!(restored.platform_fee_schedule(), manager.platform_fee_schedule());
        assert_eq!(
            restored.integrator_fee_schedule(INTEGRATOR),
            manager.integrator_fee_schedule(INTEGRATOR)
        );
        assert_eq!(restored.snapshot(), manager.snapshot());
    }

    #[test]
    fn test_restore_rejects_zero_integrator() {
        let mut state = FeeManagerState::default();
        state
            .integrators
            .insert(Address::ZERO, FeeScheduleRecord::default());
        let err = FeeManager::restore(OWNER, state).unwrap_err();
        assert!(matches!(err, FeeManagerError::ZeroAddress { .. }));
    }

    #[tokio::test]
    async fn test_fee_quoter_impl_matches_inherent_methods() {
        let mut manager = manager();
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Ratio, u(30), u(70))
            .unwrap();

        let quoter: &dyn FeeQuoter = &manager;
        let quote = quoter.compute_fee(OTHER, TOKEN, u(1_000_000)).await.unwrap();
        assert_eq!(quote.native_fee, u(3_000));
        assert_eq!(quote.asset_fee, u(7_000));
    }
}
