//! Litecoin chain support for P2SH-wrapped SegWit payments.
//!
//! Provides P2SH-P2WPKH address derivation, destination address parsing,
//! size-band fee estimation, and building and signing of transactions that
//! sweep a key's UTXOs to a single output.

pub mod address;
pub mod amount;
pub mod error;
pub mod fee;
pub mod key;
pub mod network;
pub mod transaction;
pub mod utxo;

pub use address::{key_to_p2sh_p2wpkh_address, validate_address};
pub use error::LtcError;
pub use key::KeyMaterial;
pub use network::LtcNetwork;
pub use transaction::{build_p2sh_p2wpkh_transaction, SignedTransaction};
pub use utxo::Utxo;
