// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! FeeManager contract bindings and wrapper
//!
//! This module contains the Alloy-generated bindings for a router FeeManager
//! contract of the fixed/ratio kind: owner-only schedule configuration, platform
//! fee withdrawal and the two fee views routers call before moving value.
//!
//! Integrator overrides are passed as a `FeeInfo` tuple of
//! `(feeType, nativeFee, tokenFee)`. Deployments of the share-splitting
//! FeeManager, whose `FeeInfo` carries `platformTokenShare`,
//! `platformNativeShare` and `fixedNativeAmount`, use a different selector and
//! are not covered by these bindings.

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use std::future::IntoFuture;
use tracing::{debug, info, Instrument};

use crate::error::{FeeManagerError, Result};
use crate::protocol::{FeeQuote, FeeSchedule, GrossQuote};
use crate::spans;
use FeeManager::FeeManagerInstance;

/// Deployed FeeManager contract wrapper
///
/// Configuration methods build unsigned transaction requests; the caller is
/// responsible for signing and sending them from the owner account.
///
/// # Example
///
/// ```rust,no_run
/// use fee_manager_rs::{FeeManagerContract, FeeSchedule};
/// use alloy_primitives::{address, U256};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let fee_manager = FeeManagerContract::new(
///     address!("1234567890123456789012345678901234567890"),
///     provider,
/// );
///
/// let owner = fee_manager.owner().await?;
/// let tx = fee_manager.initial_fee_struct_transaction(
///     owner,
///     &FeeSchedule::fixed(U256::from(1_000), U256::from(10_000)),
/// );
/// // Sign and send transaction...
/// # Ok(())
/// # }
/// ```
pub struct FeeManagerContract<P: Provider<Ethereum>> {
    instance: FeeManagerInstance<P>,
}

impl<P: Provider<Ethereum>> FeeManagerContract<P> {
    /// Create a new FeeManagerContract
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "fee_manager_contract_initialized"
        );
        Self {
            instance: FeeManagerInstance::new(address, provider),
        }
    }

    /// Create the transaction request replacing the platform schedule
    pub fn initial_fee_struct_transaction(
        &self,
        from: Address,
        schedule: &FeeSchedule,
    ) -> TransactionRequest {
        info!(
            from = %from,
            fee_type = schedule.fee_type().name(),
            native_fee_component = %schedule.native_component(),
            token_fee_component = %schedule.token_component(),
            contract_address = %self.instance.address(),
            event = "initial_fee_struct_transaction_created"
        );

        self.instance
            .initialFeeStruct(
                schedule.fee_type().as_u8(),
                schedule.native_component(),
                schedule.token_component(),
            )
            .from(from)
            .into_transaction_request()
    }

    /// Create the transaction request setting an integrator override
    ///
    /// # Errors
    ///
    /// Returns [`FeeManagerError::ZeroAddress`] for a zero integrator, which
    /// the contract would revert on.
    pub fn set_integrator_fees_transaction(
        &self,
        from: Address,
        integrator: Address,
        schedule: &FeeSchedule,
    ) -> Result<TransactionRequest> {
        if integrator == Address::ZERO {
            return Err(FeeManagerError::ZeroAddress {
                field: "integrator",
            });
        }

        info!(
            from = %from,
            integrator = %integrator,
            fee_type = schedule.fee_type().name(),
            native_fee_component = %schedule.native_component(),
            token_fee_component = %schedule.token_component(),
            contract_address = %self.instance.address(),
            event = "set_integrator_fees_transaction_created"
        );

        Ok(self
            .instance
            .setIntegratorFees(
                integrator,
                FeeManager::FeeInfo {
                    feeType: schedule.fee_type().as_u8(),
                    nativeFee: schedule.native_component(),
                    tokenFee: schedule.token_component(),
                },
            )
            .from(from)
            .into_transaction_request())
    }

    /// Create the transaction request handing the owner role to `new_owner`
    pub fn transfer_ownership_transaction(
        &self,
        from: Address,
        new_owner: Address,
    ) -> Result<TransactionRequest> {
        if new_owner == Address::ZERO {
            return Err(FeeManagerError::ZeroAddress { field: "new_owner" });
        }

        info!(
            from = %from,
            new_owner = %new_owner,
            contract_address = %self.instance.address(),
            event = "transfer_ownership_transaction_created"
        );

        Ok(self
            .instance
            .transferOwnership(new_owner)
            .from(from)
            .into_transaction_request())
    }

    /// Create the transaction request sweeping accumulated platform fees
    ///
    /// `tokens` lists the assets to sweep; [`NATIVE_ASSET`](crate::NATIVE_ASSET) sweeps native
    /// currency.
    pub fn withdraw_platform_fees_transaction(
        &self,
        from: Address,
        tokens: &[Address],
    ) -> Result<TransactionRequest> {
        if tokens.is_empty() {
            return Err(FeeManagerError::InvalidConfig(
                "withdrawPlatformFees needs at least one token".to_string(),
            ));
        }

        info!(
            from = %from,
            token_count = tokens.len(),
            contract_address = %self.instance.address(),
            event = "withdraw_platform_fees_transaction_created"
        );

        Ok(self
            .instance
            .withdrawPlatformFees(tokens.to_vec())
            .from(from)
            .into_transaction_request())
    }

    /// Current owner of the contract
    pub async fn owner(&self) -> std::result::Result<Address, alloy_contract::Error> {
        let span = spans::contract_call("owner", self.instance.address());
        self.instance
            .owner()
            .call()
            .into_future()
            .instrument(span.clone())
            .await
            .inspect_err(|e| span.in_scope(|| spans::record_error(e)))
    }

    /// Fee owed for transferring `amount` of `asset` on behalf of `integrator`
    pub async fn get_fee(
        &self,
        integrator: Address,
        asset: Address,
        amount: U256,
    ) -> Result<FeeQuote> {
        let span = spans::contract_call("getFee", self.instance.address());
        let result = self
            .instance
            .getFee(integrator, asset, amount)
            .call()
            .into_future()
            .instrument(span.clone())
            .await
            .inspect_err(|e| span.in_scope(|| spans::record_error(e)))?;

        debug!(
            integrator = %integrator,
            asset = %asset,
            amount = %amount,
            native_fee = %result.nativeFee,
            asset_fee = %result.tokenFee,
            contract_address = %self.instance.address(),
            event = "fee_retrieved"
        );

        Ok(FeeQuote {
            fee_asset: result.feeToken,
            native_fee: result.nativeFee,
            asset_fee: result.tokenFee,
        })
    }

    /// Gross amount that nets `net_amount` after the contract's fee
    pub async fn get_amount_before_fee(
        &self,
        integrator: Address,
        asset: Address,
        net_amount: U256,
    ) -> Result<GrossQuote> {
        let span = spans::contract_call("getAmountBeforeFee", self.instance.address());
        let result = self
            .instance
            .getAmountBeforeFee(integrator, asset, net_amount)
            .call()
            .into_future()
            .instrument(span.clone())
            .await
            .inspect_err(|e| span.in_scope(|| spans::record_error(e)))?;

        debug!(
            integrator = %integrator,
            asset = %asset,
            net_amount = %net_amount,
            gross_amount = %result.beforeAmount,
            contract_address = %self.instance.address(),
            event = "amount_before_fee_retrieved"
        );

        Ok(GrossQuote {
            fee_asset: result.feeToken,
            gross_amount: result.beforeAmount,
        })
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract FeeManager {
        event InitialFeeStruct(uint8 feeType, uint256 fixedPlatformNativeFee, uint256 platformTokenFee);
        struct FeeInfo {
            uint8 feeType;
            uint256 nativeFee;
            uint256 tokenFee;
        }

        event SetIntegratorFees(address indexed integrator, FeeInfo fee);
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function initialFeeStruct(uint8 feeType, uint256 fixedPlatformNativeFee, uint256 platformTokenFee) external;
        function setIntegratorFees(address integrator, FeeInfo calldata fee) external;
        function withdrawPlatformFees(address[] calldata tokens) external;
        function getFee(address integrator, address token, uint256 amount)
            external
            view
            returns (address feeToken, uint256 nativeFee, uint256 tokenFee);
        function getAmountBeforeFee(address integrator, address token, uint256 amount)
            external
            view
            returns (address feeToken, uint256 beforeAmount);
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{BasisPoints, FeeType, NATIVE_ASSET};
    use alloy_primitives::address;
    use alloy_provider::ProviderBuilder;
    use alloy_sol_types::SolCall;

    const CONTRACT: Address = address!("1234567890123456789012345678901234567890");
    const OWNER: Address = address!("00000000000000000000000000000000000000aa");
    const INTEGRATOR: Address = address!("00000000000000000000000000000000000000cc");

    fn contract() -> FeeManagerContract<impl Provider<Ethereum>> {
        let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
        FeeManagerContract::new(CONTRACT, provider)
    }

    fn calldata(tx: &TransactionRequest) -> Vec<u8> {
        tx.input.input().expect("calldata").to_vec()
    }

    #[test]
    fn test_initial_fee_struct_encodes_schedule() {
        let schedule = FeeSchedule::ratio(BasisPoints::new(30).unwrap(), BasisPoints::new(100).unwrap());
        let tx = contract().initial_fee_struct_transaction(OWNER, &schedule);

        assert_eq!(tx.from, Some(OWNER));
        let call = FeeManager::initialFeeStructCall::abi_decode(&calldata(&tx)).unwrap();
        assert_eq!(call.feeType, FeeType::Ratio.as_u8());
        assert_eq!(call.fixedPlatformNativeFee, U256::from(30));
        assert_eq!(call.platformTokenFee, U256::from(100));
    }

    #[test]
    fn test_set_integrator_fees_encodes_override() {
        let schedule = FeeSchedule::fixed(U256::from(1_000_000), U256::from(5));
        let tx = contract()
            .set_integrator_fees_transaction(OWNER, INTEGRATOR, &schedule)
            .unwrap();

        let call = FeeManager::setIntegratorFeesCall::abi_decode(&calldata(&tx)).unwrap();
        assert_eq!(call.integrator, INTEGRATOR);
        assert_eq!(call.fee.feeType, FeeType::Fixed.as_u8());
        assert_eq!(call.fee.nativeFee, U256::from(1_000_000));
        assert_eq!(call.fee.tokenFee, U256::from(5));
    }

    #[test]
    fn test_set_integrator_fees_uses_tuple_selector() {
        assert_eq!(
            FeeManager::setIntegratorFeesCall::SIGNATURE,
            "setIntegratorFees(address,(uint8,uint256,uint256))"
        );
    }

    #[test]
    fn test_withdraw_platform_fees_encodes_tokens() {
        let token = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        let tx = contract()
            .withdraw_platform_fees_transaction(OWNER, &[token, NATIVE_ASSET])
            .unwrap();

        assert_eq!(tx.from, Some(OWNER));
        let call = FeeManager::withdrawPlatformFeesCall::abi_decode(&calldata(&tx)).unwrap();
        assert_eq!(call.tokens, vec![token, NATIVE_ASSET]);
    }

    #[test]
    fn test_withdraw_platform_fees_requires_tokens() {
        let err = contract()
            .withdraw_platform_fees_transaction(OWNER, &[])
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_addresses_rejected_locally() {
        let contract = contract();
        let err = contract
            .set_integrator_fees_transaction(OWNER, Address::ZERO, &FeeSchedule::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FeeManagerError::ZeroAddress {
                field: "integrator"
            }
        ));
        assert!(contract
            .transfer_ownership_transaction(OWNER, Address::ZERO)
            .is_err());
    }

    #[test]
    fn test_transfer_ownership_encodes_new_owner() {
        let tx = contract()
            .transfer_ownership_transaction(OWNER, INTEGRATOR)
            .unwrap();
        let call = FeeManager::transferOwnershipCall::abi_decode(&calldata(&tx)).unwrap();
        assert_eq!(call.newOwner, INTEGRATOR);
    }

    #[test]
    fn test_address() {
        assert_eq!(contract().address(), CONTRACT);
    }
}
