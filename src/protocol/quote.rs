use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Sentinel address denoting the chain's native currency
pub const NATIVE_ASSET: Address = Address::ZERO;

/// Fee owed for a transfer of `amount` of some asset
///
/// `native_fee` is always denominated in native currency. `asset_fee` is
/// denominated in `fee_asset` and is always zero for native transfers, whose
/// whole fee is folded into `native_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee_asset: Address,
    pub native_fee: U256,
    pub asset_fee: U256,
}

impl FeeQuote {
    pub fn is_native(&self) -> bool {
        self.fee_asset == NATIVE_ASSET
    }

    /// Part of the fee taken out of the transferred amount
    pub fn deducted(&self) -> U256 {
        if self.is_native() {
            self.native_fee
        } else {
            self.asset_fee
        }
    }
}

/// Gross amount the payer must send so the recipient nets the requested amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossQuote {
    pub fee_asset: Address,
    pub gross_amount: U256,
}
