//! Litecoin payments over HTTP.
//!
//! Wraps the pure `chain-ltc` builder with an Insight indexer client and a
//! two-endpoint broadcaster. [`LtcPayments`] is the entry point:
//!
//! ```no_run
//! # async fn run() -> Result<(), ltc_payments::PaymentError> {
//! use chain_ltc::amount::parse_ltc;
//! use chain_ltc::KeyMaterial;
//! use ltc_payments::{LtcPayments, PaymentsOptions, SendOptions};
//!
//! let payments = LtcPayments::new(PaymentsOptions {
//!     network: Some("testnet".into()),
//!     ..Default::default()
//! })?;
//! let key = KeyMaterial::from_wif("cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA", payments.network())?;
//! let txid = payments
//!     .send_payment(&key, "QYUjH72fa7bYCobdUhrdCYUijWJgd58kWH", parse_ltc("0.005")?, SendOptions::default())
//!     .await?;
//! println!("{txid}");
//! # Ok(())
//! # }
//! ```

pub mod broadcast;
pub mod config;
pub mod error;
pub mod indexer;
pub mod payments;

pub use broadcast::Broadcaster;
pub use config::{PaymentsConfig, PaymentsOptions};
pub use error::PaymentError;
pub use indexer::{Balance, InsightClient, TxHistoryEntry};
pub use payments::{LtcPayments, SendOptions};
