//! Method names understood by dev-chain simulators (anvil, hardhat, ganache).

/// Lists the accounts the node manages.
pub const ETH_ACCOUNTS: &str = "eth_accounts";

/// Shifts the node's clock forward by a number of seconds.
pub const EVM_INCREASE_TIME: &str = "evm_increaseTime";

/// Forces a block to be mined.
pub const EVM_MINE: &str = "evm_mine";

pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

pub const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

pub const ETH_GET_BALANCE: &str = "eth_getBalance";

/// Block tag for the most recently mined block.
pub const LATEST_BLOCK_TAG: &str = "latest";
