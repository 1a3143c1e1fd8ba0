// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Router-side transfer quoting
//!
//! A router that wants its recipient to receive an exact amount asks the fee
//! source for the gross amount first, then prices that gross amount, and
//! checks that the two answers agree before moving any value.

use alloy_primitives::{Address, U256};
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, Instrument};

use crate::error::{FeeManagerError, Result};
use crate::protocol::NATIVE_ASSET;
use crate::spans;
use crate::traits::FeeQuoter;

/// Parameters for quoting a transfer
#[derive(Builder, Debug, Clone, Copy)]
pub struct QuoteRequest {
    /// Integrator the transfer is routed for; the zero address selects the
    /// platform schedule
    #[builder(default)]
    integrator: Address,
    asset: Address,
    net_amount: U256,
}

impl QuoteRequest {
    pub fn integrator(&self) -> Address {
        self.integrator
    }

    pub fn asset(&self) -> Address {
        self.asset
    }

    pub fn net_amount(&self) -> U256 {
        self.net_amount
    }
}

/// Everything a router needs to execute a fee-bearing transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferQuote {
    pub integrator: Address,
    pub fee_asset: Address,
    pub net_amount: U256,
    pub gross_amount: U256,
    pub native_fee: U256,
    pub asset_fee: U256,
}

impl TransferQuote {
    /// Quotes `request` against `quoter`
    ///
    /// # Errors
    ///
    /// Propagates quoter errors, and returns
    /// [`FeeManagerError::QuoteMismatch`] if the fee on the quoted gross
    /// amount would leave the recipient short.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fee_manager_rs::transfer::{QuoteRequest, TransferQuote};
    /// use fee_manager_rs::{FeeManager, FeeType};
    /// use alloy_primitives::{address, U256};
    ///
    /// # async fn example() -> fee_manager_rs::Result<()> {
    /// let owner = address!("00000000000000000000000000000000000000aa");
    /// let mut manager = FeeManager::new(owner);
    /// manager.set_platform_fee_schedule(owner, FeeType::Ratio, U256::ZERO, U256::from(100))?;
    ///
    /// let request = QuoteRequest::builder()
    ///     .asset(address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"))
    ///     .net_amount(U256::from(10_000))
    ///     .build();
    /// let quote = TransferQuote::quote(&manager, &request).await?;
    /// assert_eq!(quote.gross_amount, U256::from(10_101));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn quote<Q>(quoter: &Q, request: &QuoteRequest) -> Result<Self>
    where
        Q: FeeQuoter + ?Sized,
    {
        let span = spans::quote_transfer(
            &request.integrator,
            &request.asset,
            &request.net_amount,
        );

        let result = Self::quote_inner(quoter, request)
            .instrument(span.clone())
            .await;

        match &result {
            Ok(quote) => {
                span.record("gross_amount", tracing::field::display(quote.gross_amount));
            }
            Err(e) => span.in_scope(|| spans::record_error(e)),
        }
        result
    }

    async fn quote_inner<Q>(quoter: &Q, request: &QuoteRequest) -> Result<Self>
    where
        Q: FeeQuoter + ?Sized,
    {
        let gross = quoter
            .compute_gross_from_net(request.integrator, request.asset, request.net_amount)
            .await?;
        let fee = quoter
            .compute_fee(request.integrator, request.asset, gross.gross_amount)
            .await?;

        match gross.gross_amount.checked_sub(fee.deducted()) {
            Some(delivered) if delivered >= request.net_amount => {}
            _ => {
                return Err(FeeManagerError::QuoteMismatch {
                    gross_amount: gross.gross_amount,
                    net_amount: request.net_amount,
                })
            }
        }

        debug!(
            integrator = %request.integrator,
            asset = %request.asset,
            net_amount = %request.net_amount,
            gross_amount = %gross.gross_amount,
            native_fee = %fee.native_fee,
            asset_fee = %fee.asset_fee,
            event = "transfer_quoted"
        );

        Ok(Self {
            integrator: request.integrator,
            fee_asset: fee.fee_asset,
            net_amount: request.net_amount,
            gross_amount: gross.gross_amount,
            native_fee: fee.native_fee,
            asset_fee: fee.asset_fee,
        })
    }

    pub fn is_native(&self) -> bool {
        self.fee_asset == NATIVE_ASSET
    }

    /// Native currency the payer attaches to the transfer
    ///
    /// For a native transfer the fee is already inside the gross amount; for
    /// an ERC20 transfer only the native fee is attached.
    pub fn native_value(&self) -> U256 {
        if self.is_native() {
            self.gross_amount
        } else {
            self.native_fee
        }
    }

    /// Amount of `fee_asset` pulled from the payer, zero for native transfers
    pub fn token_amount(&self) -> U256 {
        if self.is_native() {
            U256::ZERO
        } else {
            self.gross_amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeFeeQuoter;
    use crate::{FeeManager, FeeType};
    use alloy_primitives::address;

    const OWNER: Address = address!("00000000000000000000000000000000000000aa");
    const TOKEN: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    fn request(asset: Address, net_amount: u64) -> QuoteRequest {
        QuoteRequest::builder()
            .asset(asset)
            .net_amount(U256::from(net_amount))
            .build()
    }

    #[test]
    fn test_quote_request_builder_defaults_integrator() {
        let request = request(TOKEN, 1_000);
        assert_eq!(request.integrator(), Address::ZERO);
        assert_eq!(request.asset(), TOKEN);
        assert_eq!(request.net_amount(), U256::from(1_000));
    }

    #[tokio::test]
    async fn test_erc20_quote_against_manager() {
        let mut manager = FeeManager::new(OWNER);
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, U256::from(1_000), U256::from(10_000))
            .unwrap();

        let quote = TransferQuote::quote(&manager, &request(TOKEN, 90_000))
            .await
            .unwrap();

        assert_eq!(quote.gross_amount, U256::from(100_000));
        assert_eq!(quote.asset_fee, U256::from(10_000));
        assert_eq!(quote.native_fee, U256::from(1_000));
        assert_eq!(quote.token_amount(), U256::from(100_000));
        assert_eq!(quote.native_value(), U256::from(1_000));
    }

    #[tokio::test]
    async fn test_native_quote_folds_fee_into_value() {
        let mut manager = FeeManager::new(OWNER);
        manager
            .set_platform_fee_schedule(OWNER, FeeType::Fixed, U256::from(1_000), U256::from(10_000))
            .unwrap();

        let quote = TransferQuote::quote(&manager, &request(NATIVE_ASSET, 90_000))
            .await
            .unwrap();

        assert!(quote.is_native());
        assert_eq!(quote.gross_amount, U256::from(101_000));
        assert_eq!(quote.native_fee, U256::from(11_000));
        assert_eq!(quote.asset_fee, U256::ZERO);
        assert_eq!(quote.native_value(), U256::from(101_000));
        assert_eq!(quote.token_amount(), U256::ZERO);
    }

    #[tokio::test]
    async fn test_inconsistent_quoter_is_rejected() {
        let quoter = FakeFeeQuoter::new();
        quoter.set_gross_amount(TOKEN, U256::from(1_000));
        quoter.set_fee(TOKEN, U256::ZERO, U256::from(10));

        let err = TransferQuote::quote(&quoter, &request(TOKEN, 1_000))
            .await
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::QuoteMismatch { .. }));
    }

    #[tokio::test]
    async fn test_quoter_failure_propagates() {
        let quoter = FakeFeeQuoter::new();
        quoter.add_failure(TOKEN);

        let err = TransferQuote::quote(&quoter, &request(TOKEN, 1_000))
            .await
            .unwrap_err();
        assert!(matches!(err, FeeManagerError::Provider(_)));
        assert_eq!(quoter.call_count(), 1);
    }
}
