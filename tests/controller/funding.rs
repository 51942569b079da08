//! Account discovery and funding against the in-memory chain.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use alloy_primitives::U256;
use integration_tests::{new_year_2020, new_year_config, outside_account};
use simclock_controller::{ControllerError, TransactionError};
use simclock_rpc_types::{methods, RpcError};
use simclock_test_utils::SimTestHarness;

#[tokio::test]
async fn test_new_year_scenario() -> anyhow::Result<()> {
    let account_a = outside_account(0xaa);
    let mut harness = SimTestHarness::new(&new_year_config([account_a]));
    let balance_a = harness.chain().balance(account_a);
    assert!(balance_a > U256::ZERO);

    let accounts = harness.controller_mut().discover_accounts().await?;
    assert_eq!(harness.controller().primary_account(), accounts.first().copied());

    harness.fund(account_a, U256::from(1000)).await?;
    assert_eq!(
        harness.chain().balance(account_a),
        balance_a + U256::from(1000)
    );

    harness.controller().advance_time(300).await?;
    let five_past = new_year_2020().timestamp() as u64 + 300;
    assert!(harness.controller().latest_block_timestamp().await? >= five_past);
    Ok(())
}

#[tokio::test]
async fn test_fund_before_discovery_fails_without_rpc() {
    let harness = SimTestHarness::new(&new_year_config([]));

    let err = harness
        .controller()
        .fund_account(outside_account(0x01), U256::from(1))
        .await
        .unwrap_err();

    assert!(matches!(err, ControllerError::PrimaryAccountUnset));
    assert!(harness.chain().calls().is_empty());
}

#[tokio::test]
async fn test_zero_transfer_leaves_balances_unchanged() -> anyhow::Result<()> {
    let recipient = outside_account(0x02);
    let harness = SimTestHarness::new_with_discovered_accounts(&new_year_config([])).await?;
    let primary = harness
        .controller()
        .primary_account()
        .ok_or_else(|| anyhow::anyhow!("no primary account"))?;

    let primary_before = harness.controller().balance_of(primary).await?;
    let recipient_before = harness.controller().balance_of(recipient).await?;

    let receipt = harness.fund(recipient, U256::ZERO).await?;
    assert!(receipt.succeeded());

    assert_eq!(harness.controller().balance_of(primary).await?, primary_before);
    assert_eq!(
        harness.controller().balance_of(recipient).await?,
        recipient_before
    );
    Ok(())
}

#[tokio::test]
async fn test_funding_debits_primary() -> anyhow::Result<()> {
    let recipient = outside_account(0x03);
    let harness = SimTestHarness::new_with_discovered_accounts(&new_year_config([])).await?;
    let primary = harness.chain().accounts()[0];
    let before = harness.chain().balance(primary);

    harness.fund(recipient, U256::from(7)).await?;
    harness.fund(recipient, U256::from(8)).await?;

    assert_eq!(harness.chain().balance(recipient), U256::from(15));
    assert_eq!(harness.chain().balance(primary), before - U256::from(15));
    assert_eq!(harness.chain().call_count(methods::ETH_SEND_TRANSACTION), 2);
    Ok(())
}

#[tokio::test]
async fn test_overdraft_surfaces_transaction_error() -> anyhow::Result<()> {
    let harness = SimTestHarness::new_with_discovered_accounts(&new_year_config([])).await?;

    let err = harness
        .controller()
        .fund_account(outside_account(0x04), U256::MAX)
        .await
        .unwrap_err();

    match err {
        ControllerError::Transaction(TransactionError::Rpc(rpc)) => {
            assert!(rpc.message.contains("insufficient funds"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(harness.chain().call_count(methods::ETH_GET_TRANSACTION_RECEIPT), 0);
    Ok(())
}

#[tokio::test]
async fn test_discovery_failure_leaves_primary_unset() {
    let mut harness = SimTestHarness::new(&new_year_config([]));
    harness.chain().fail_next(
        methods::ETH_ACCOUNTS,
        RpcError::server("accounts locked"),
    );

    assert!(harness.controller_mut().discover_accounts().await.is_err());
    assert_eq!(harness.controller().primary_account(), None);
}
