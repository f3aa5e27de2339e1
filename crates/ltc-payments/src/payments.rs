//! The payment orchestrator: derive address, fetch UTXOs, build, broadcast.

use bitcoin::{Amount, Txid};
use chain_ltc::fee::relay_fee;
use chain_ltc::{
    build_p2sh_p2wpkh_transaction, key_to_p2sh_p2wpkh_address, KeyMaterial, LtcError, LtcNetwork,
    SignedTransaction, Utxo,
};
use reqwest::Client;
use tracing::{info, warn};

use crate::broadcast::Broadcaster;
use crate::config::{PaymentsConfig, PaymentsOptions};
use crate::error::PaymentError;
use crate::indexer::{Balance, InsightClient, TxHistoryEntry};

/// Testnet faucets hand out many tiny outputs; only the first few are spent.
const TESTNET_UTXO_LIMIT: usize = 2;

/// Per-call overrides for [`LtcPayments::send_payment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Replaces the configured rate for this payment. Zero means "use the
    /// configured rate".
    pub fee_per_byte: Option<u64>,
}

/// Litecoin P2SH-P2WPKH payments against an Insight indexer.
///
/// Holds no per-call state; every operation takes `&self`.
#[derive(Debug, Clone)]
pub struct LtcPayments {
    config: PaymentsConfig,
    indexer: InsightClient,
    broadcaster: Broadcaster,
}

impl LtcPayments {
    /// Resolve `options` and set up the HTTP client. Fails on an unknown
    /// network or a malformed endpoint.
    pub fn new(options: PaymentsOptions) -> Result<Self, PaymentError> {
        Self::with_config(PaymentsConfig::resolve(options)?)
    }

    pub fn with_config(config: PaymentsConfig) -> Result<Self, PaymentError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::Configuration(format!("HTTP client: {e}")))?;

        let indexer = InsightClient::new(client.clone(), &config.insight_url);
        let broadcaster = Broadcaster::new(
            client,
            config.broadcast_url.clone(),
            config.backup_broadcast_url.clone(),
        );

        info!(
            network = %config.network,
            insight_url = %config.insight_url,
            fee_per_byte = config.fee_per_byte,
            "litecoin payments ready"
        );

        Ok(Self {
            config,
            indexer,
            broadcaster,
        })
    }

    pub fn config(&self) -> &PaymentsConfig {
        &self.config
    }

    pub fn network(&self) -> LtcNetwork {
        self.config.network
    }

    /// Wrapped-SegWit address of `key` on the configured network.
    pub fn address(&self, key: &KeyMaterial) -> Result<String, PaymentError> {
        Ok(key_to_p2sh_p2wpkh_address(key, self.config.network)?)
    }

    pub async fn get_balance(&self, address: &str) -> Result<Balance, PaymentError> {
        self.indexer.get_balance(address).await
    }

    /// Spendable outputs of `key`'s address. An empty set is
    /// [`LtcError::NoUtxos`]. On testnet only the first two are returned.
    pub async fn get_utxos(&self, key: &KeyMaterial) -> Result<Vec<Utxo>, PaymentError> {
        let address = self.address(key)?;
        let mut utxos = self.indexer.get_utxos(&address).await?;
        if utxos.is_empty() {
            return Err(LtcError::NoUtxos.into());
        }

        if self.config.network == LtcNetwork::Testnet && utxos.len() > TESTNET_UTXO_LIMIT {
            warn!(
                address = %address,
                available = utxos.len(),
                used = TESTNET_UTXO_LIMIT,
                "testnet: spending only the first utxos"
            );
            utxos.truncate(TESTNET_UTXO_LIMIT);
        }
        Ok(utxos)
    }

    /// Build and sign a sweep of `utxos` to `destination`. The fee is taken
    /// out of `amount`.
    pub fn build_transaction(
        &self,
        key: &KeyMaterial,
        destination: &str,
        amount: Amount,
        utxos: &[Utxo],
        fee_per_byte: Option<u64>,
    ) -> Result<SignedTransaction, PaymentError> {
        Ok(build_p2sh_p2wpkh_transaction(
            key,
            self.config.network,
            destination,
            amount,
            utxos,
            self.fee_rate(fee_per_byte),
        )?)
    }

    pub async fn broadcast_transaction(
        &self,
        tx: &mut SignedTransaction,
    ) -> Result<Txid, PaymentError> {
        self.broadcaster.broadcast(tx).await
    }

    /// Send `amount` (fee included) from `key` to `destination` and return
    /// the txid. Nothing is broadcast unless the build succeeds.
    pub async fn send_payment(
        &self,
        key: &KeyMaterial,
        destination: &str,
        amount: Amount,
        options: SendOptions,
    ) -> Result<Txid, PaymentError> {
        let utxos = self.get_utxos(key).await?;
        let mut tx =
            self.build_transaction(key, destination, amount, &utxos, options.fee_per_byte)?;

        info!(
            destination,
            inputs = utxos.len(),
            fee_sat = tx.fee().to_sat(),
            output_sat = tx.output_value().to_sat(),
            txid = %tx.txid(),
            "sending payment"
        );

        self.broadcast_transaction(&mut tx).await
    }

    pub async fn get_tx_history(&self, address: &str) -> Result<Vec<TxHistoryEntry>, PaymentError> {
        self.indexer.get_tx_history(address).await
    }

    /// Fee a payment from `key` would pay right now: every current UTXO as
    /// an input, one output, floored at the relay minimum.
    pub async fn get_fee(
        &self,
        key: &KeyMaterial,
        fee_per_byte: Option<u64>,
    ) -> Result<Amount, PaymentError> {
        let utxos = self.get_utxos(key).await?;
        Ok(relay_fee(self.fee_rate(fee_per_byte), utxos.len()))
    }

    fn fee_rate(&self, requested: Option<u64>) -> u64 {
        requested
            .filter(|rate| *rate > 0)
            .unwrap_or(self.config.fee_per_byte)
    }
}
