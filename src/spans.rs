//! OpenTelemetry span helpers for fee operations
//!
//! This module provides orthogonal span instrumentation: static span names,
//! structured attributes, and separation from the fee arithmetic.
//!
//! # Usage
//!
//! These span helpers are used internally by [`FeeManager`](crate::FeeManager)
//! and the contract wrappers, but are exposed publicly for routers that want
//! to nest their own instrumentation under the same names.
//!
//! # Example
//!
//! ```rust,no_run
//! use fee_manager_rs::spans;
//! use alloy_primitives::{Address, U256};
//!
//! let span = spans::compute_fee(&Address::ZERO, &Address::ZERO, &U256::from(1_000));
//! let _guard = span.enter();
//! // Your custom quoting logic here
//! ```

use alloy_primitives::{Address, U256};
use tracing::Span;

use crate::protocol::FeeType;

/// Create span for an owner-only fee schedule update.
///
/// `scope` is `"platform"` or `"integrator"`; `integrator` is empty for the
/// platform scope.
///
/// Parent: Caller's administrative operation span
/// Children: None
#[inline]
pub fn set_fee_schedule(
    scope: &'static str,
    caller: &Address,
    integrator: Option<&Address>,
    fee_type: FeeType,
    native_component: &U256,
    token_component: &U256,
) -> Span {
    let span = tracing::info_span!(
        "fee_manager_rs.set_fee_schedule",
        scope = scope,
        caller = %caller,
        integrator = tracing::field::Empty,
        fee_type = fee_type.name(),
        native_component = %native_component,
        token_component = %token_component,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    );
    if let Some(integrator) = integrator {
        span.record("integrator", tracing::field::display(integrator));
    }
    span
}

/// Create span for an ownership transfer.
///
/// Parent: Caller's administrative operation span
/// Children: None
#[inline]
pub fn transfer_ownership(caller: &Address, new_owner: &Address) -> Span {
    tracing::info_span!(
        "fee_manager_rs.transfer_ownership",
        caller = %caller,
        new_owner = %new_owner,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a forward fee computation.
///
/// Parent: Router quoting span
/// Children: None
#[inline]
pub fn compute_fee(integrator: &Address, asset: &Address, amount: &U256) -> Span {
    tracing::debug_span!(
        "fee_manager_rs.compute_fee",
        integrator = %integrator,
        asset = %asset,
        amount = %amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for an inverse (net to gross) fee computation.
///
/// Parent: Router quoting span
/// Children: None
#[inline]
pub fn compute_gross_from_net(integrator: &Address, asset: &Address, net_amount: &U256) -> Span {
    tracing::debug_span!(
        "fee_manager_rs.compute_gross_from_net",
        integrator = %integrator,
        asset = %asset,
        net_amount = %net_amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a read against a deployed FeeManager contract.
///
/// Parent: compute_fee or compute_gross_from_net
/// Children: Provider RPC calls (from alloy instrumentation)
#[inline]
pub fn contract_call(method: &str, contract_address: &Address) -> Span {
    tracing::debug_span!(
        "fee_manager_rs.contract_call",
        rpc.method = method,
        contract_address = %contract_address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for quoting a complete router transfer.
///
/// Parent: Router operation span
/// Children: compute_gross_from_net, compute_fee
#[inline]
pub fn quote_transfer(integrator: &Address, asset: &Address, net_amount: &U256) -> Span {
    tracing::info_span!(
        "fee_manager_rs.quote_transfer",
        integrator = %integrator,
        asset = %asset,
        net_amount = %net_amount,
        gross_amount = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: The underlying cause, when there is one
///
/// # Example
///
/// ```rust,no_run
/// use fee_manager_rs::spans;
/// use fee_manager_rs::FeeManagerError;
///
/// # fn example() -> Result<(), FeeManagerError> {
/// let span = tracing::info_span!("fee_manager_rs.operation");
/// let _guard = span.enter();
///
/// let result = some_operation();
/// if let Err(ref e) = result {
///     spans::record_error(e);
/// }
/// result
/// # }
/// # fn some_operation() -> Result<(), FeeManagerError> { Ok(()) }
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}
