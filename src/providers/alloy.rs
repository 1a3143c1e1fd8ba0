//! Alloy-based fee quoter reading a deployed FeeManager contract.

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use tracing::{instrument, trace};

use crate::config::ContractConfig;
use crate::contracts::fee_manager::FeeManagerContract;
use crate::error::Result;
use crate::protocol::{FeeQuote, GrossQuote};
use crate::traits::FeeQuoter;

/// Production fee quoter wrapping a [`FeeManagerContract`].
///
/// Lets router code written against [`FeeQuoter`] quote from the chain
/// instead of a local [`FeeManager`](crate::FeeManager).
///
/// # Examples
///
/// ```rust,no_run
/// use fee_manager_rs::providers::AlloyFeeQuoter;
/// use fee_manager_rs::ContractConfig;
///
/// # fn example() -> fee_manager_rs::Result<()> {
/// let quoter = AlloyFeeQuoter::from_config(&ContractConfig::from_env()?);
/// # Ok(())
/// # }
/// ```
pub struct AlloyFeeQuoter<P: Provider<Ethereum>> {
    contract: FeeManagerContract<P>,
}

impl AlloyFeeQuoter<DynProvider<Ethereum>> {
    /// Connects an HTTP provider to the configured endpoint.
    pub fn from_config(config: &ContractConfig) -> Self {
        let provider = ProviderBuilder::new()
            .connect_http(config.rpc_url.clone())
            .erased();
        Self::new(FeeManagerContract::new(config.contract_address, provider))
    }
}

impl<P: Provider<Ethereum>> AlloyFeeQuoter<P> {
    pub fn new(contract: FeeManagerContract<P>) -> Self {
        Self { contract }
    }

    /// Returns a reference to the underlying contract wrapper.
    pub fn contract(&self) -> &FeeManagerContract<P> {
        &self.contract
    }
}

#[async_trait]
impl<P> FeeQuoter for AlloyFeeQuoter<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    #[instrument(skip(self), fields(contract_address = %self.contract.address()))]
    async fn compute_fee(
        &self,
        integrator: Address,
        asset: Address,
        amount: U256,
    ) -> Result<FeeQuote> {
        trace!("Fetching fee from contract");
        self.contract.get_fee(integrator, asset, amount).await
    }

    #[instrument(skip(self), fields(contract_address = %self.contract.address()))]
    async fn compute_gross_from_net(
        &self,
        integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote> {
        trace!("Fetching amount before fee from contract");
        self.contract
            .get_amount_before_fee(integrator, asset, net_amount)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_from_config_targets_configured_contract() {
        let config = ContractConfig::new(
            "http://localhost:8545".parse().unwrap(),
            address!("1234567890123456789012345678901234567890"),
        );
        let quoter = AlloyFeeQuoter::from_config(&config);
        assert_eq!(quoter.contract().address(), config.contract_address);
    }
}
