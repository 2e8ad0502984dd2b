use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::TransactionRequest,
    transports::TransportErrorKind,
};
use async_trait::async_trait;
use base_network_utils::{
    rpc::{ChainClient, TransactionSubmitter},
    BaseNetworkUtils, ServiceError, BASE_MAINNET,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Canned node responses; `None` makes the call fail like a dead endpoint
#[derive(Default)]
pub struct StubClient {
    pub gas_price: Option<U256>,
    pub estimate: Option<U256>,
    pub balance: Option<U256>,
    /// Number of calls that reached the stub
    pub calls: AtomicUsize,
}

impl StubClient {
    fn answer<T: Copy>(&self, value: Option<T>) -> Result<T, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        value.ok_or_else(|| TransportErrorKind::custom_str("connection refused").into())
    }
}

#[async_trait]
impl ChainClient for StubClient {
    async fn gas_price(&self) -> Result<U256, ServiceError> {
        self.answer(self.gas_price)
    }

    async fn estimate_gas(&self, _tx: TransactionRequest) -> Result<U256, ServiceError> {
        self.answer(self.estimate)
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, ServiceError> {
        self.answer(self.balance)
    }

    async fn block_number(&self) -> Result<u64, ServiceError> {
        self.answer(Some(1_234))
    }

    async fn chain_id(&self) -> Result<u64, ServiceError> {
        self.answer(Some(BASE_MAINNET.chain_id))
    }
}

/// Signer that accepts everything and returns a fixed hash
pub struct StubWallet;

pub const STUB_TX_HASH: TxHash = TxHash::repeat_byte(0x11);

#[async_trait]
impl TransactionSubmitter for StubWallet {
    fn address(&self) -> Address {
        Address::repeat_byte(0x22)
    }

    async fn send_transaction(&self, _tx: TransactionRequest) -> Result<TxHash, ServiceError> {
        Ok(STUB_TX_HASH)
    }
}

/// Read-only utils over `client`, keeping a handle on the stub for call counting
pub fn read_only(client: StubClient) -> (Arc<BaseNetworkUtils>, Arc<StubClient>) {
    let client = Arc::new(client);
    let utils = BaseNetworkUtils::from_parts(&BASE_MAINNET, client.clone(), None);
    (Arc::new(utils), client)
}

pub fn with_wallet(client: StubClient) -> Arc<BaseNetworkUtils> {
    Arc::new(BaseNetworkUtils::from_parts(
        &BASE_MAINNET,
        Arc::new(client),
        Some(Arc::new(StubWallet)),
    ))
}
