use std::sync::Arc;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, TxHash, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::ServiceError;

/// Read-side view of an Ethereum-compatible node
///
/// Every method is a single RPC round trip. Failures are returned as
/// [`ServiceError::Rpc`] without retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current gas price quote (`eth_gasPrice`)
    async fn gas_price(&self) -> Result<U256, ServiceError>;

    /// Raw gas limit estimate (`eth_estimateGas`)
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<U256, ServiceError>;

    /// Native balance in wei
    async fn get_balance(&self, address: Address) -> Result<U256, ServiceError>;

    /// Latest block number
    async fn block_number(&self) -> Result<u64, ServiceError>;

    /// Chain id reported by the node
    async fn chain_id(&self) -> Result<u64, ServiceError>;
}

/// Signing identity able to submit transactions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Address transactions are sent from
    fn address(&self) -> Address;

    /// Fill, sign and broadcast a transaction, returning its hash
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ServiceError>;
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url, ServiceError> {
    rpc_url
        .parse()
        .map_err(|e| ServiceError::InvalidRpcUrl(format!("{rpc_url}: {e}")))
}

/// Ethereum RPC client for blockchain interactions
///
/// Wraps a typed alloy HTTP provider. Building the client does not touch
/// the network; the first request does.
#[derive(Clone)]
pub struct EthereumClient {
    /// Typed provider for the target network
    pub provider: Arc<dyn Provider<Ethereum>>,
}

impl EthereumClient {
    /// Create a new client bound to `rpc_url`
    pub fn new(rpc_url: &str) -> Result<Self, ServiceError> {
        let provider = ProviderBuilder::new()
            .network::<Ethereum>()
            .on_http(parse_rpc_url(rpc_url)?);

        debug!(%rpc_url, "created HTTP provider");
        Ok(Self {
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl ChainClient for EthereumClient {
    #[instrument(skip(self), err)]
    async fn gas_price(&self) -> Result<U256, ServiceError> {
        let price = self.provider.get_gas_price().await?;
        debug!(%price, "fetched gas price");
        Ok(U256::from(price))
    }

    #[instrument(skip(self, tx), err)]
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<U256, ServiceError> {
        debug!("Estimating gas for transaction request: {:?}", tx);
        let gas = self.provider.estimate_gas(tx).await?;
        Ok(U256::from(gas))
    }

    #[instrument(skip(self), err)]
    async fn get_balance(&self, address: Address) -> Result<U256, ServiceError> {
        Ok(self.provider.get_balance(address).await?)
    }

    #[instrument(skip(self), err)]
    async fn block_number(&self) -> Result<u64, ServiceError> {
        Ok(self.provider.get_block_number().await?)
    }

    #[instrument(skip(self), err)]
    async fn chain_id(&self) -> Result<u64, ServiceError> {
        Ok(self.provider.get_chain_id().await?)
    }
}

/// Provider with a local private key attached
///
/// Nonce, gas and fee fields missing from a request are filled by the
/// provider before signing.
#[derive(Clone)]
pub struct WalletClient {
    address: Address,
    provider: Arc<dyn Provider<Ethereum>>,
}

impl WalletClient {
    /// Build a signing client from a hex private key (with or without `0x`)
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self, ServiceError> {
        // the key itself must never end up in an error message
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidPrivateKey("not a valid secp256k1 key".into()))?;
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .on_http(parse_rpc_url(rpc_url)?);

        debug!(%address, "created wallet provider");
        Ok(Self {
            address,
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl TransactionSubmitter for WalletClient {
    fn address(&self) -> Address {
        self.address
    }

    #[instrument(skip(self, tx), fields(from = %self.address), err)]
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, ServiceError> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }
}
