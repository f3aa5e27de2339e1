use chain_ltc::LtcError;
use thiserror::Error;

/// Errors surfaced by the payment flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Options could not be resolved into a usable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A balance, UTXO or history query failed (transport error, timeout,
    /// non-200 status, or an unparseable body).
    #[error("indexer request to {url} failed: {reason}")]
    Indexer { url: String, reason: String },

    /// Both the primary and the backup broadcast endpoint refused the
    /// transaction.
    #[error("unable to broadcast. Some debug info: {backup} ---- {primary}")]
    Broadcast { primary: String, backup: String },

    /// Address, key, or transaction construction failure, including
    /// `NoUtxos` and `InsufficientFunds`.
    #[error(transparent)]
    Chain(#[from] LtcError),
}
