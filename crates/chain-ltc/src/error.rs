use thiserror::Error;

/// Litecoin chain operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LtcError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    /// The spendable set handed to the builder was empty.
    #[error("no UTXOs available")]
    NoUtxos,

    /// The net spend (`amount - fee`) exceeds the value of every input combined.
    #[error("insufficient funds: have {have} sat, need {need} sat")]
    InsufficientFunds { have: u64, need: u64 },

    /// The requested amount cannot even cover the fee deducted from it.
    #[error("amount {amount} sat does not cover fee {fee} sat")]
    AmountBelowFee { amount: u64, fee: u64 },

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_private_key() {
        let err = LtcError::InvalidPrivateKey("key too short".into());
        assert_eq!(err.to_string(), "invalid private key: key too short");
    }

    #[test]
    fn display_invalid_address() {
        let err = LtcError::InvalidAddress("bad checksum".into());
        assert_eq!(err.to_string(), "invalid address: bad checksum");
    }

    #[test]
    fn display_no_utxos() {
        assert_eq!(LtcError::NoUtxos.to_string(), "no UTXOs available");
    }

    #[test]
    fn display_insufficient_funds() {
        let err = LtcError::InsufficientFunds {
            have: 800_000,
            need: 900_000,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: have 800000 sat, need 900000 sat"
        );
    }

    #[test]
    fn display_amount_below_fee() {
        let err = LtcError::AmountBelowFee {
            amount: 500,
            fee: 1_000,
        };
        assert_eq!(err.to_string(), "amount 500 sat does not cover fee 1000 sat");
    }

    #[test]
    fn display_invalid_network() {
        let err = LtcError::InvalidNetwork("regtest".into());
        assert_eq!(err.to_string(), "invalid network: regtest");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(LtcError::SigningError("sighash failed".into()));
        assert!(err.to_string().contains("sighash failed"));
    }

    #[test]
    fn clone_and_eq() {
        let e1 = LtcError::InvalidAmount("negative".into());
        assert_eq!(e1.clone(), e1);
    }
}
