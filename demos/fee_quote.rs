//! Quoting a router transfer against an in-memory fee manager
//!
//! This example configures a platform schedule and one integrator override,
//! then quotes the same net transfer for both, for an ERC20 and for native
//! currency.
//!
//! Run with: `cargo run --example fee_quote`

use alloy_primitives::{address, Address, U256};
use fee_manager_rs::{
    FeeManager, FeeManagerError, FeeType, QuoteRequest, TransferQuote, NATIVE_ASSET,
};

#[tokio::main]
async fn main() -> Result<(), FeeManagerError> {
    // Initialize tracing for better debugging
    tracing_subscriber::fmt::init();

    println!("Fee Quote Example");
    println!("=================\n");

    let owner = address!("00000000000000000000000000000000000000aa");
    let integrator = address!("00000000000000000000000000000000000000cc");
    let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

    // Step 1: Configure fees
    println!("1. Configuring schedules...");
    let mut manager = FeeManager::new(owner);
    manager.set_platform_fee_schedule(owner, FeeType::Fixed, U256::from(1_000), U256::from(10_000))?;
    manager.set_integrator_fee_schedule(
        owner,
        integrator,
        FeeType::Ratio,
        U256::from(30),
        U256::from(100),
    )?;
    println!("   Platform:   {:?}", manager.platform_fee_schedule());
    println!("   Integrator: {:?}\n", manager.resolve_schedule(integrator));

    // Step 2: Quote the same net amount for each caller and asset
    println!("2. Quoting a transfer that nets 10000 units...");
    let net_amount = U256::from(10_000);
    for (label, caller) in [("platform", Address::ZERO), ("integrator", integrator)] {
        for asset in [usdc, NATIVE_ASSET] {
            let request = QuoteRequest::builder()
                .integrator(caller)
                .asset(asset)
                .net_amount(net_amount)
                .build();
            let quote = TransferQuote::quote(&manager, &request).await?;

            println!(
                "   {label:<10} {}: pull {} of the asset, attach {} native (asset fee {}, native fee {})",
                if quote.is_native() { "native" } else { "usdc  " },
                quote.token_amount(),
                quote.native_value(),
                quote.asset_fee,
                quote.native_fee,
            );
        }
    }

    // Step 3: Rejected configuration leaves the schedule untouched
    println!("\n3. Attempting an out-of-range ratio...");
    match manager.set_platform_fee_schedule(owner, FeeType::Ratio, U256::ZERO, U256::from(10_001)) {
        Err(e) => println!("   Rejected: {e}"),
        Ok(_) => println!("   Unexpectedly accepted"),
    }

    Ok(())
}
