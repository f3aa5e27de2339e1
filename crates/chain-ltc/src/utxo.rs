use bitcoin::{Amount, OutPoint, Txid};
use serde::{Deserialize, Serialize};

use crate::error::LtcError;

/// A single unspent transaction output (UTXO).
///
/// Deserializes straight from an Insight `/utxo` record; confirmation count,
/// height and timestamp fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Transaction ID as a hex string (big-endian / display order).
    pub txid: String,
    /// Output index within the transaction.
    pub vout: u32,
    /// Value in satoshis.
    pub satoshis: u64,
}

impl Utxo {
    pub fn new(txid: impl Into<String>, vout: u32, satoshis: u64) -> Self {
        Self {
            txid: txid.into(),
            vout,
            satoshis,
        }
    }

    pub fn value(&self) -> Amount {
        Amount::from_sat(self.satoshis)
    }

    /// The outpoint this UTXO refers to.
    pub fn outpoint(&self) -> Result<OutPoint, LtcError> {
        let txid: Txid = self
            .txid
            .parse()
            .map_err(|e| LtcError::TransactionBuildError(format!("invalid txid {:?}: {e}", self.txid)))?;
        Ok(OutPoint::new(txid, self.vout))
    }
}

/// Sum of all UTXO values, or `None` on overflow.
pub fn total_value(utxos: &[Utxo]) -> Option<Amount> {
    utxos
        .iter()
        .try_fold(Amount::ZERO, |acc, utxo| acc.checked_add(utxo.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_insight_record_and_drops_extra_fields() {
        let json = r#"{
            "address": "MR8UQSBr5ULwWheBHznrHk2jxyxkHQu8vB",
            "txid": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "vout": 1,
            "scriptPubKey": "a914bcfeb728b584253d5f3f70bcb780e9ef218a68f487",
            "amount": 0.005,
            "satoshis": 500000,
            "height": 1500000,
            "confirmations": 12,
            "ts": 1541234567
        }"#;
        let utxo: Utxo = serde_json::from_str(json).unwrap();
        assert_eq!(utxo, Utxo::new("a".repeat(64), 1, 500_000));
    }

    #[test]
    fn total_value_sums_all_outputs() {
        let utxos = vec![
            Utxo::new("a".repeat(64), 0, 500_000),
            Utxo::new("b".repeat(64), 3, 300_000),
        ];
        assert_eq!(total_value(&utxos), Some(Amount::from_sat(800_000)));
    }

    #[test]
    fn total_value_of_nothing_is_zero() {
        assert_eq!(total_value(&[]), Some(Amount::ZERO));
    }

    #[test]
    fn outpoint_parses_txid() {
        let utxo = Utxo::new("ab".repeat(32), 7, 1);
        let outpoint = utxo.outpoint().unwrap();
        assert_eq!(outpoint.vout, 7);
        assert_eq!(outpoint.txid.to_string(), "ab".repeat(32));
    }

    #[test]
    fn outpoint_rejects_bad_txid() {
        let utxo = Utxo::new("not-a-txid", 0, 1);
        assert!(matches!(
            utxo.outpoint(),
            Err(LtcError::TransactionBuildError(_))
        ));
    }
}
