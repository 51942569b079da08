//! Clock control against the in-memory chain.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use integration_tests::{new_year_2020, new_year_config};
use simclock_controller::ControllerError;
use simclock_rpc_types::{methods, RpcError};
use simclock_test_utils::SimTestHarness;

#[tokio::test]
async fn test_advance_time_moves_latest_block_forward() -> anyhow::Result<()> {
    let harness = SimTestHarness::new(&new_year_config([]));
    let controller = harness.controller();

    for seconds in [0, 1, 300, 86_400] {
        let before = controller.latest_block_timestamp().await?;
        controller.advance_time(seconds).await?;
        let after = controller.latest_block_timestamp().await?;
        assert!(
            after >= before + seconds,
            "jump of {seconds}s went from {before} to {after}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_sequential_jumps_accumulate() -> anyhow::Result<()> {
    let harness = SimTestHarness::new(&new_year_config([]));
    let start = new_year_2020().timestamp() as u64;

    harness.controller().advance_time(100).await?;
    harness.controller().advance_time(100).await?;

    assert!(harness.controller().latest_block_timestamp().await? >= start + 200);
    assert_eq!(harness.chain().time_offset(), 200);
    Ok(())
}

#[tokio::test]
async fn test_advance_time_issues_increase_then_mine() -> anyhow::Result<()> {
    let harness = SimTestHarness::new(&new_year_config([]));
    harness.controller().advance_time(42).await?;

    assert_eq!(
        harness.chain().calls(),
        vec![methods::EVM_INCREASE_TIME, methods::EVM_MINE]
    );
    Ok(())
}

#[tokio::test]
async fn test_failed_increase_never_mines() {
    let harness = SimTestHarness::new(&new_year_config([]));
    let chain = harness.chain();
    let blocks_before = chain.block_count();
    chain.fail_next(
        methods::EVM_INCREASE_TIME,
        RpcError::server("time travel disabled"),
    );

    let err = harness.controller().advance_time(60).await.unwrap_err();

    assert!(matches!(err, ControllerError::Rpc(ref e) if e.message == "time travel disabled"));
    assert_eq!(chain.calls(), vec![methods::EVM_INCREASE_TIME]);
    assert_eq!(chain.block_count(), blocks_before);
    assert_eq!(chain.time_offset(), 0);
}

#[tokio::test]
async fn test_failed_mine_is_surfaced() {
    let harness = SimTestHarness::new(&new_year_config([]));
    harness
        .chain()
        .fail_next(methods::EVM_MINE, RpcError::server("miner stopped"));

    let err = harness.controller().advance_time(60).await.unwrap_err();

    assert!(matches!(err, ControllerError::Rpc(ref e) if e.message == "miner stopped"));
    assert_eq!(harness.chain().call_count(methods::EVM_MINE), 1);
    // The jump was applied but no block was produced to expose it.
    assert_eq!(harness.chain().block_count(), 1);
}

#[tokio::test]
async fn test_mine_blocks_keeps_timestamp() -> anyhow::Result<()> {
    let harness = SimTestHarness::new(&new_year_config([]));
    let start = harness.controller().latest_block_timestamp().await?;

    harness.controller().mine_blocks(3).await?;

    assert_eq!(harness.chain().block_count(), 4);
    assert_eq!(harness.controller().latest_block_timestamp().await?, start);
    Ok(())
}
