//! Insight-style block indexer client.
//!
//! Three queries are used: the address summary (`addr/{address}`), its
//! unspent outputs (`addr/{address}/utxo`) and its transaction page
//! (`txs?address={address}`). Coin-denominated fields are converted to
//! [`Amount`] here and nowhere else.

use bitcoin::{Amount, SignedAmount};
use chain_ltc::Utxo;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::PaymentError;

/// Confirmed and unconfirmed balance of one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub balance: Amount,
    /// Net effect of mempool transactions; negative while a spend is pending.
    pub unconfirmed_balance: SignedAmount,
}

/// One transaction touching an address, reduced to the fields wallets show.
///
/// Every field is optional because indexers omit them for coinbase and
/// unconfirmed transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHistoryEntry {
    pub txid: String,
    /// First address of the first output.
    pub send_address: Option<String>,
    /// Address funding the first input.
    pub receive_address: Option<String>,
    pub fee: Option<Amount>,
    /// Total input value.
    pub amount_sent: Option<Amount>,
    /// Total output value.
    pub amount_received: Option<Amount>,
    /// Unix seconds.
    pub date: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressSummary {
    balance: f64,
    #[serde(default)]
    unconfirmed_balance: f64,
    balance_sat: Option<u64>,
    unconfirmed_balance_sat: Option<i64>,
}

#[derive(Deserialize)]
struct TxPage {
    #[serde(default)]
    txs: Vec<InsightTx>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightTx {
    txid: String,
    #[serde(default)]
    vin: Vec<InsightVin>,
    #[serde(default)]
    vout: Vec<InsightVout>,
    fees: Option<f64>,
    value_in: Option<f64>,
    value_out: Option<f64>,
    time: Option<u64>,
}

#[derive(Deserialize)]
struct InsightVin {
    addr: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightVout {
    addresses: Option<Vec<String>>,
    script_pub_key: Option<InsightScriptPubKey>,
}

#[derive(Deserialize)]
struct InsightScriptPubKey {
    addresses: Option<Vec<String>>,
}

impl InsightVout {
    fn first_address(&self) -> Option<String> {
        self.addresses
            .as_ref()
            .or_else(|| self.script_pub_key.as_ref()?.addresses.as_ref())
            .and_then(|addresses| addresses.first().cloned())
    }
}

/// HTTP client for an Insight API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: Client,
    base_url: String,
}

impl InsightClient {
    /// `client` carries the request timeout; `base_url` may end with `/` or not.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_balance(&self, address: &str) -> Result<Balance, PaymentError> {
        let url = format!("{}/addr/{address}", self.base_url);
        let summary: AddressSummary = self.get_json(&url).await?;

        let balance = match summary.balance_sat {
            Some(sat) => Amount::from_sat(sat),
            None => Amount::from_btc(summary.balance).map_err(|e| indexer_error(&url, e))?,
        };
        let unconfirmed_balance = match summary.unconfirmed_balance_sat {
            Some(sat) => SignedAmount::from_sat(sat),
            None => SignedAmount::from_btc(summary.unconfirmed_balance)
                .map_err(|e| indexer_error(&url, e))?,
        };

        Ok(Balance {
            balance,
            unconfirmed_balance,
        })
    }

    /// Unspent outputs in the order the indexer lists them.
    pub async fn get_utxos(&self, address: &str) -> Result<Vec<Utxo>, PaymentError> {
        let url = format!("{}/addr/{address}/utxo", self.base_url);
        let utxos: Vec<Utxo> = self.get_json(&url).await?;
        debug!(address, count = utxos.len(), "fetched utxos");
        Ok(utxos)
    }

    /// First page of transactions touching `address`, in indexer order.
    pub async fn get_tx_history(&self, address: &str) -> Result<Vec<TxHistoryEntry>, PaymentError> {
        let url = format!("{}/txs?address={address}", self.base_url);
        let page: TxPage = self.get_json(&url).await?;

        page.txs
            .into_iter()
            .map(|tx| {
                let coin = |value: Option<f64>| {
                    value
                        .map(Amount::from_btc)
                        .transpose()
                        .map_err(|e| indexer_error(&url, e))
                };
                Ok::<_, PaymentError>(TxHistoryEntry {
                    send_address: tx.vout.first().and_then(InsightVout::first_address),
                    receive_address: tx.vin.first().and_then(|vin| vin.addr.clone()),
                    fee: coin(tx.fees)?,
                    amount_sent: coin(tx.value_in)?,
                    amount_received: coin(tx.value_out)?,
                    date: tx.time,
                    txid: tx.txid,
                })
            })
            .collect()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PaymentError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| indexer_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(indexer_error(url, format!("HTTP {status}")));
        }

        response.json().await.map_err(|e| indexer_error(url, e))
    }
}

fn indexer_error(url: &str, reason: impl ToString) -> PaymentError {
    PaymentError::Indexer {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
