use alloy_primitives::{Address, U256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeManagerError {
    #[error("Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    #[error("Zero address not allowed for {field}")]
    ZeroAddress { field: &'static str },

    #[error("Invalid ratio: {component} component {value} exceeds 10000 basis points")]
    InvalidRatio {
        component: &'static str,
        value: U256,
    },

    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    #[error("Net amount {net_amount} cannot be reached: fee consumes the entire amount")]
    NetAmountUnreachable { net_amount: U256 },

    #[error("Quote mismatch: gross amount {gross_amount} does not net {net_amount}")]
    QuoteMismatch { gross_amount: U256, net_amount: U256 },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Contract call failed: {0}")]
    ContractCall(#[from] alloy_contract::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, FeeManagerError>;
