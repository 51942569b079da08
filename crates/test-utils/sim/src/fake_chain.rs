//! In-memory chain that answers simulator RPC calls.

use std::collections::{HashMap, HashSet, VecDeque};

use alloy_primitives::{keccak256, Address, TxHash, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use simclock_rpc_types::{methods, RpcError, RpcRequest, RpcResponse};
use simclock_simulator::{Simulator, SimulatorConfig, SimulatorError};

/// A mined block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeBlock {
    pub number: u64,
    pub timestamp: u64,
    pub transactions: Vec<TxHash>,
}

#[derive(Debug, Clone, Copy)]
struct FakeReceipt {
    from: Address,
    to: Address,
    block_number: u64,
}

#[derive(Debug, Deserialize)]
struct SendParams {
    from: Address,
    to: Address,
    #[serde(default)]
    value: U256,
}

#[derive(Debug)]
struct ChainState {
    accounts: Vec<Address>,
    unlocked: HashSet<Address>,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    /// Time the next block is stamped with.
    clock: u64,
    /// Sum of all `evm_increaseTime` jumps.
    offset: u64,
    blocks: Vec<FakeBlock>,
    receipts: HashMap<TxHash, FakeReceipt>,
    calls: Vec<String>,
    failures: HashMap<String, VecDeque<RpcError>>,
}

/// Simulator double backed by in-memory state.
///
/// Blocks are only produced by `evm_mine` and by `eth_sendTransaction` (automine). A block is
/// stamped with the current clock, which starts at the configured genesis time and only moves
/// through `evm_increaseTime`.
#[derive(Debug)]
pub struct FakeChain {
    state: Mutex<ChainState>,
}

/// Deterministic address of the `index`th dev account.
pub fn dev_account(index: usize) -> Address {
    Address::from_word(keccak256(format!("simclock-dev-account-{index}")))
}

impl FakeChain {
    /// Builds a chain at `config.start_timestamp` with `config.account_count` dev accounts.
    ///
    /// Dev accounts and unlocked accounts all start with the default balance and may send.
    pub fn new(config: &SimulatorConfig) -> Self {
        let accounts: Vec<Address> = (0..config.account_count).map(dev_account).collect();
        let unlocked: HashSet<Address> = config.unlocked_accounts.iter().copied().collect();
        let balance = config.default_balance_wei();
        let balances = accounts
            .iter()
            .chain(unlocked.iter())
            .map(|addr| (*addr, balance))
            .collect();

        let genesis = FakeBlock {
            number: 0,
            timestamp: config.start_timestamp,
            transactions: Vec::new(),
        };

        Self {
            state: Mutex::new(ChainState {
                accounts,
                unlocked,
                balances,
                nonces: HashMap::new(),
                clock: config.start_timestamp,
                offset: 0,
                blocks: vec![genesis],
                receipts: HashMap::new(),
                calls: Vec::new(),
                failures: HashMap::new(),
            }),
        }
    }

    pub fn accounts(&self) -> Vec<Address> {
        self.state.lock().accounts.clone()
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.state.lock().balance(address)
    }

    pub fn latest_block(&self) -> FakeBlock {
        self.state.lock().latest().clone()
    }

    pub fn block_count(&self) -> usize {
        self.state.lock().blocks.len()
    }

    /// Total seconds added through `evm_increaseTime`.
    pub fn time_offset(&self) -> u64 {
        self.state.lock().offset
    }

    /// Methods received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state.lock().calls.iter().filter(|m| *m == method).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Makes the next call to `method` fail with `error` without touching state.
    ///
    /// Queued failures for the same method are consumed in order.
    pub fn fail_next(&self, method: &str, error: RpcError) {
        self.state
            .lock()
            .failures
            .entry(method.to_owned())
            .or_default()
            .push_back(error);
    }
}

impl ChainState {
    fn latest(&self) -> &FakeBlock {
        // Genesis is pushed at construction and blocks are never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn take_failure(&mut self, method: &str) -> Option<RpcError> {
        self.failures.get_mut(method).and_then(VecDeque::pop_front)
    }

    fn mine(&mut self, transactions: Vec<TxHash>) -> u64 {
        let number = self.blocks.len() as u64;
        let timestamp = self.clock.max(self.latest().timestamp);
        self.blocks.push(FakeBlock {
            number,
            timestamp,
            transactions,
        });
        number
    }

    fn handle(&mut self, method: &str, params: &[Value]) -> Result<Value, RpcError> {
        match method {
            methods::ETH_ACCOUNTS => Ok(json!(self.accounts)),
            methods::EVM_INCREASE_TIME => {
                let seconds = parse_quantity(params.first())?;
                self.clock = self.clock.saturating_add(seconds);
                self.offset = self.offset.saturating_add(seconds);
                Ok(json!(self.offset))
            }
            methods::EVM_MINE => {
                self.mine(Vec::new());
                Ok(json!("0x0"))
            }
            methods::ETH_GET_BLOCK_BY_NUMBER => {
                let block = match params.first().and_then(Value::as_str) {
                    Some("latest") | Some("pending") | None => Some(self.latest()),
                    Some("earliest") => self.blocks.first(),
                    Some(_) => {
                        let number = parse_quantity(params.first())?;
                        self.blocks.get(number as usize)
                    }
                };
                Ok(block.map_or(Value::Null, block_json))
            }
            methods::ETH_GET_BALANCE => {
                let address: Address = parse_param(params.first())?;
                Ok(json!(self.balance(address)))
            }
            methods::ETH_SEND_TRANSACTION => {
                let tx: SendParams = parse_param(params.first())?;
                self.send(tx).map(|hash| json!(hash))
            }
            methods::ETH_GET_TRANSACTION_RECEIPT => {
                let hash: TxHash = parse_param(params.first())?;
                Ok(self
                    .receipts
                    .get(&hash)
                    .map_or(Value::Null, |r| receipt_json(hash, r)))
            }
            other => Err(RpcError::method_not_found(other)),
        }
    }

    fn send(&mut self, tx: SendParams) -> Result<TxHash, RpcError> {
        let SendParams { from, to, value } = tx;
        if !self.accounts.contains(&from) && !self.unlocked.contains(&from) {
            return Err(RpcError::server(format!("sender {from} is not unlocked")));
        }

        let balance = self.balance(from);
        if balance < value {
            return Err(RpcError::server("insufficient funds for transfer"));
        }
        self.balances.insert(from, balance - value);
        *self.balances.entry(to).or_default() += value;

        let nonce = self.nonces.entry(from).or_default();
        let nonce_bytes = nonce.to_be_bytes();
        let value_bytes = value.to_be_bytes::<32>();
        let preimage: [&[u8]; 4] = [from.as_slice(), &nonce_bytes, to.as_slice(), &value_bytes];
        let hash = keccak256(preimage.concat());
        *nonce += 1;

        let block_number = self.mine(vec![hash]);
        self.receipts.insert(
            hash,
            FakeReceipt {
                from,
                to,
                block_number,
            },
        );
        Ok(hash)
    }
}

fn parse_param<T: for<'de> Deserialize<'de>>(param: Option<&Value>) -> Result<T, RpcError> {
    let param = param.ok_or_else(|| RpcError::invalid_params("missing parameter"))?;
    serde_json::from_value(param.clone()).map_err(|e| RpcError::invalid_params(e.to_string()))
}

/// Accepts a JSON number, a `0x` hex string or a decimal string.
fn parse_quantity(param: Option<&Value>) -> Result<u64, RpcError> {
    let invalid = || RpcError::invalid_params(format!("expected a quantity, got {param:?}"));
    match param {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(invalid),
        Some(Value::String(s)) => match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).map_err(|_| invalid()),
            None => s.parse().map_err(|_| invalid()),
        },
        _ => Err(invalid()),
    }
}

fn block_json(block: &FakeBlock) -> Value {
    json!({
        "number": format!("{:#x}", block.number),
        "timestamp": format!("{:#x}", block.timestamp),
        "hash": B256::from(U256::from(block.number)),
        "transactions": block.transactions,
    })
}

fn receipt_json(hash: TxHash, receipt: &FakeReceipt) -> Value {
    json!({
        "transactionHash": hash,
        "blockNumber": format!("{:#x}", receipt.block_number),
        "from": receipt.from,
        "to": receipt.to,
        "status": "0x1",
    })
}

#[async_trait]
impl Simulator for FakeChain {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse, SimulatorError> {
        let mut state = self.state.lock();
        state.calls.push(request.method.clone());

        let outcome = match state.take_failure(&request.method) {
            Some(err) => Err(err),
            None => state.handle(&request.method, &request.params),
        };

        Ok(match outcome {
            Ok(result) => RpcResponse::success(request.id, result),
            Err(err) => RpcResponse::failure(request.id, err),
        })
    }
}
