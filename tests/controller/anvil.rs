//! End-to-end scenarios against a real `anvil` process.
//!
//! These need `anvil` on `PATH` and are ignored by default:
//! `cargo test -p integration-tests --test controller_anvil -- --ignored`.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use alloy_primitives::U256;
use integration_tests::{new_year_2020, new_year_config, outside_account};
use simclock_controller::{Controller, ValueTransferClient};

#[tokio::test]
#[ignore = "requires an anvil binary on PATH"]
async fn test_new_year_scenario_on_anvil() -> anyhow::Result<()> {
    let account_a = outside_account(0xaa);
    let mut controller = Controller::launch(&new_year_config([account_a]))?;

    let accounts = controller.discover_accounts().await?;
    assert_eq!(accounts.as_slice(), controller.simulator().dev_accounts());
    assert_eq!(controller.client().default_sender(), accounts.first().copied());

    let before = controller.balance_of(account_a).await?;
    controller.fund_account(account_a, U256::from(1000)).await?;
    assert_eq!(
        controller.balance_of(account_a).await?,
        before + U256::from(1000)
    );

    controller.advance_time(300).await?;
    let five_past = new_year_2020().timestamp() as u64 + 300;
    assert!(controller.latest_block_timestamp().await? >= five_past);
    Ok(())
}

#[tokio::test]
#[ignore = "requires an anvil binary on PATH"]
async fn test_sequential_jumps_on_anvil() -> anyhow::Result<()> {
    let controller = Controller::launch(&new_year_config([]))?;
    let before = controller.latest_block_timestamp().await?;

    controller.advance_time(100).await?;
    controller.advance_time(100).await?;

    assert!(controller.latest_block_timestamp().await? >= before + 200);
    Ok(())
}
