//! Push signed transactions to a primary endpoint with one backup retry.

use bitcoin::Txid;
use chain_ltc::SignedTransaction;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::error::PaymentError;

/// Sends raw transaction hex as the POST body. Only HTTP 200 counts as
/// accepted; anything else, including a transport error or timeout, moves
/// on to the backup. There is no retry after the backup.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    client: Client,
    primary_url: String,
    backup_url: String,
}

impl Broadcaster {
    pub fn new(client: Client, primary_url: impl Into<String>, backup_url: impl Into<String>) -> Self {
        Self {
            client,
            primary_url: primary_url.into(),
            backup_url: backup_url.into(),
        }
    }

    /// On success the transaction is marked broadcasted and its
    /// precomputed txid is returned. Endpoint response bodies are never
    /// parsed for a txid.
    pub async fn broadcast(&self, tx: &mut SignedTransaction) -> Result<Txid, PaymentError> {
        let primary = self.attempt(&self.primary_url, tx.raw_hex()).await;
        let primary_failure = match primary {
            Ok(()) => return Ok(accept(tx, &self.primary_url)),
            Err(failure) => failure,
        };

        warn!(
            endpoint = %self.primary_url,
            txid = %tx.txid(),
            error = %primary_failure,
            "primary broadcast failed, retrying against backup"
        );

        let backup = self.attempt(&self.backup_url, tx.raw_hex()).await;
        match backup {
            Ok(()) => Ok(accept(tx, &self.backup_url)),
            Err(backup_failure) => Err(PaymentError::Broadcast {
                primary: primary_failure,
                backup: backup_failure,
            }),
        }
    }

    /// Returns the failure body (or transport error) on rejection.
    async fn attempt(&self, url: &str, raw_hex: &str) -> Result<(), String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(raw_hex.to_owned())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            Err(format!("HTTP {status}"))
        } else {
            Err(body)
        }
    }
}

fn accept(tx: &mut SignedTransaction, endpoint: &str) -> Txid {
    tx.mark_broadcasted();
    info!(endpoint, txid = %tx.txid(), "transaction broadcast");
    tx.txid()
}
