//! Configuration documents and environment loading
//!
//! A [`FeeManagerConfig`] seeds an owner, the platform schedule, and any
//! integrator overrides. It can be read from JSON or from environment
//! variables (a `.env` file is honoured through `dotenvy`), mirroring the
//! arguments the deployment tasks pass to `initialFeeStruct`.
//!
//! A [`ContractConfig`] locates a deployed FeeManager contract.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use url::Url;

use crate::error::{FeeManagerError, Result};
use crate::protocol::FeeType;

/// Owner address of the fee manager
pub const ENV_OWNER: &str = "FEE_MANAGER_OWNER";
/// Platform fee type, `fixed`/`ratio` or `0`/`1`
pub const ENV_FEE_TYPE: &str = "FEE_MANAGER_FEE_TYPE";
/// Platform native fee component
pub const ENV_NATIVE_FEE: &str = "FEE_MANAGER_NATIVE_FEE";
/// Platform token fee component
pub const ENV_TOKEN_FEE: &str = "FEE_MANAGER_TOKEN_FEE";
/// JSON-RPC endpoint of the chain hosting a deployed FeeManager
pub const ENV_RPC_URL: &str = "FEE_MANAGER_RPC_URL";
/// Address of a deployed FeeManager
pub const ENV_CONTRACT_ADDRESS: &str = "FEE_MANAGER_ADDRESS";

/// Raw schedule values as an administrator writes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub fee_type: FeeType,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub native_fee: U256,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub token_fee: U256,
}

/// Accepts a JSON number or a decimal / `0x`-hex string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<U256, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(u64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(U256::from(value)),
        RawAmount::Text(value) => U256::from_str(value.trim()).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    pub integrator: Address,
    #[serde(flatten)]
    pub schedule: ScheduleConfig,
}

/// Seed configuration for a [`FeeManager`](crate::FeeManager)
///
/// Values are not validated here; [`FeeManager::from_config`](crate::FeeManager::from_config)
/// runs them through the same checks as live owner operations.
///
/// # Example
///
/// ```rust
/// use fee_manager_rs::{FeeManager, FeeManagerConfig};
///
/// let config = FeeManagerConfig::from_json_str(r#"{
///     "owner": "0x00000000000000000000000000000000000000aa",
///     "platform": { "fee_type": "fixed", "native_fee": "1000", "token_fee": "10000" }
/// }"#).unwrap();
///
/// let manager = FeeManager::from_config(&config).unwrap();
/// assert_eq!(manager.owner(), config.owner);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeManagerConfig {
    pub owner: Address,
    #[serde(default)]
    pub platform: ScheduleConfig,
    #[serde(default)]
    pub integrators: Vec<IntegratorConfig>,
}

impl FeeManagerConfig {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            platform: ScheduleConfig::default(),
            integrators: Vec::new(),
        }
    }

    pub fn with_platform(mut self, fee_type: FeeType, native_fee: U256, token_fee: U256) -> Self {
        self.platform = ScheduleConfig {
            fee_type,
            native_fee,
            token_fee,
        };
        self
    }

    pub fn with_integrator(
        mut self,
        integrator: Address,
        fee_type: FeeType,
        native_fee: U256,
        token_fee: U256,
    ) -> Self {
        self.integrators.push(IntegratorConfig {
            integrator,
            schedule: ScheduleConfig {
                fee_type,
                native_fee,
                token_fee,
            },
        });
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FeeManagerError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Reads the owner and platform schedule from the environment
    ///
    /// `FEE_MANAGER_OWNER` is required; the schedule variables default to a
    /// zero fixed schedule when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner = lookup(ENV_OWNER)
            .ok_or_else(|| FeeManagerError::InvalidConfig(format!("{ENV_OWNER} is not set")))?;
        let owner = Address::from_str(owner.trim())?;

        let fee_type = lookup(ENV_FEE_TYPE)
            .map(|raw| {
                raw.parse::<FeeType>()
                    .map_err(|e| FeeManagerError::InvalidConfig(format!("{ENV_FEE_TYPE}: {e}")))
            })
            .transpose()?
            .unwrap_or_default();
        let native_fee = parse_amount(ENV_NATIVE_FEE, lookup(ENV_NATIVE_FEE))?;
        let token_fee = parse_amount(ENV_TOKEN_FEE, lookup(ENV_TOKEN_FEE))?;

        Ok(Self::new(owner).with_platform(fee_type, native_fee, token_fee))
    }
}

fn parse_amount(key: &str, raw: Option<String>) -> Result<U256> {
    match raw {
        None => Ok(U256::ZERO),
        Some(raw) => U256::from_str(raw.trim())
            .map_err(|e| FeeManagerError::InvalidConfig(format!("{key}: {e}"))),
    }
}

/// Location of a deployed FeeManager contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub rpc_url: Url,
    pub contract_address: Address,
}

impl ContractConfig {
    pub fn new(rpc_url: Url, contract_address: Address) -> Self {
        Self {
            rpc_url,
            contract_address,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup(ENV_RPC_URL)
            .ok_or_else(|| FeeManagerError::InvalidConfig(format!("{ENV_RPC_URL} is not set")))?;
        let rpc_url = Url::parse(rpc_url.trim())
            .map_err(|e| FeeManagerError::InvalidConfig(format!("{ENV_RPC_URL}: {e}")))?;

        let contract_address = lookup(ENV_CONTRACT_ADDRESS).ok_or_else(|| {
            FeeManagerError::InvalidConfig(format!("{ENV_CONTRACT_ADDRESS} is not set"))
        })?;
        let contract_address = Address::from_str(contract_address.trim())?;
        if contract_address == Address::ZERO {
            return Err(FeeManagerError::ZeroAddress {
                field: "contract_address",
            });
        }

        Ok(Self::new(rpc_url, contract_address))
    }
}
