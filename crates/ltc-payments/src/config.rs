//! Options accepted from callers and the configuration they resolve to.
//!
//! Every default lives in the constants below. Options are resolved exactly
//! once, when [`PaymentsConfig::resolve`] runs; the result is never mutated.

use std::time::Duration;

use chain_ltc::LtcNetwork;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PaymentError;

pub use chain_ltc::fee::DEFAULT_FEE_RATE_SAT_PER_BYTE;

/// Public Insight instance used when no indexer is configured.
pub const DEFAULT_INSIGHT_URL: &str = "https://insight.litecore.io/api/";

/// Endpoint every broadcast is sent to first.
pub const DEFAULT_BROADCAST_URL: &str = "https://ltc1.trezor.io/api/sendtx/";

/// Endpoint of the single retry after a failed primary broadcast.
pub const DEFAULT_BACKUP_BROADCAST_URL: &str = "https://ltc1.trezor.io/api/sendtx/";

/// Per-request timeout for indexer queries and each broadcast attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Caller-supplied options. Every field is optional; missing or empty values
/// take the defaults above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentsOptions {
    pub insight_url: Option<String>,
    pub fee_per_byte: Option<u64>,
    /// `"mainnet"` or `"testnet"`.
    pub network: Option<String>,
    pub broadcast_url: Option<String>,
    pub backup_broadcast_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl PaymentsOptions {
    /// Parse options from a JSON object such as
    /// `{"network": "testnet", "feePerByte": 50}`.
    pub fn from_json(json: &str) -> Result<Self, PaymentError> {
        serde_json::from_str(json)
            .map_err(|e| PaymentError::Configuration(format!("malformed options: {e}")))
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsConfig {
    pub insight_url: String,
    pub fee_per_byte: u64,
    pub network: LtcNetwork,
    pub broadcast_url: String,
    pub backup_broadcast_url: String,
    pub request_timeout: Duration,
}

impl PaymentsConfig {
    /// Apply defaults and validate. An unknown network is fatal.
    pub fn resolve(options: PaymentsOptions) -> Result<Self, PaymentError> {
        let network = match non_empty(options.network) {
            None => LtcNetwork::Mainnet,
            Some(name) => name.parse().map_err(|_| {
                PaymentError::Configuration(format!("Invalid network provided {name}"))
            })?,
        };

        let insight_url = match non_empty(options.insight_url) {
            Some(url) => url,
            None => {
                warn!(
                    insight_url = DEFAULT_INSIGHT_URL,
                    "using default litecoin block explorer; configure your own indexer"
                );
                DEFAULT_INSIGHT_URL.to_string()
            }
        };

        let fee_per_byte = match options.fee_per_byte {
            Some(0) => {
                return Err(PaymentError::Configuration(
                    "feePerByte must be positive".into(),
                ))
            }
            Some(rate) => rate,
            None => DEFAULT_FEE_RATE_SAT_PER_BYTE,
        };

        let request_timeout = match options.request_timeout_ms {
            Some(0) => {
                return Err(PaymentError::Configuration(
                    "requestTimeoutMs must be positive".into(),
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let broadcast_url =
            non_empty(options.broadcast_url).unwrap_or_else(|| DEFAULT_BROADCAST_URL.to_string());
        let backup_broadcast_url = non_empty(options.backup_broadcast_url)
            .unwrap_or_else(|| DEFAULT_BACKUP_BROADCAST_URL.to_string());

        for (name, url) in [
            ("insightUrl", &insight_url),
            ("broadcastUrl", &broadcast_url),
            ("backupBroadcastUrl", &backup_broadcast_url),
        ] {
            Url::parse(url)
                .map_err(|e| PaymentError::Configuration(format!("{name} {url:?}: {e}")))?;
        }

        Ok(Self {
            insight_url,
            fee_per_byte,
            network,
            broadcast_url,
            backup_broadcast_url,
            request_timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = PaymentsConfig::resolve(PaymentsOptions::default()).unwrap();
        assert_eq!(config.insight_url, DEFAULT_INSIGHT_URL);
        assert_eq!(config.fee_per_byte, 30);
        assert_eq!(config.network, LtcNetwork::Mainnet);
        assert_eq!(config.broadcast_url, DEFAULT_BROADCAST_URL);
        assert_eq!(config.backup_broadcast_url, DEFAULT_BACKUP_BROADCAST_URL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn explicit_values_win() {
        let options = PaymentsOptions {
            insight_url: Some("https://insight.example/api/".into()),
            fee_per_byte: Some(55),
            network: Some("testnet".into()),
            broadcast_url: Some("https://primary.example/sendtx".into()),
            backup_broadcast_url: Some("https://backup.example/sendtx".into()),
            request_timeout_ms: Some(1_500),
        };
        let config = PaymentsConfig::resolve(options).unwrap();
        assert_eq!(config.insight_url, "https://insight.example/api/");
        assert_eq!(config.fee_per_byte, 55);
        assert_eq!(config.network, LtcNetwork::Testnet);
        assert_eq!(config.broadcast_url, "https://primary.example/sendtx");
        assert_eq!(config.backup_broadcast_url, "https://backup.example/sendtx");
        assert_eq!(config.request_timeout, Duration::from_millis(1_500));
    }

    #[test]
    fn unknown_network_is_fatal() {
        let options = PaymentsOptions {
            network: Some("regtest".into()),
            ..Default::default()
        };
        let err = PaymentsConfig::resolve(options).unwrap_err();
        assert_eq!(
            err,
            PaymentError::Configuration("Invalid network provided regtest".into())
        );
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let options = PaymentsOptions {
            insight_url: Some(String::new()),
            network: Some(String::new()),
            backup_broadcast_url: Some("  ".into()),
            ..Default::default()
        };
        let config = PaymentsConfig::resolve(options).unwrap();
        assert_eq!(config.insight_url, DEFAULT_INSIGHT_URL);
        assert_eq!(config.network, LtcNetwork::Mainnet);
        assert_eq!(config.backup_broadcast_url, DEFAULT_BACKUP_BROADCAST_URL);
    }

    #[test]
    fn zero_fee_rate_is_rejected() {
        let options = PaymentsOptions {
            fee_per_byte: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            PaymentsConfig::resolve(options),
            Err(PaymentError::Configuration(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let options = PaymentsOptions {
            request_timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(PaymentsConfig::resolve(options).is_err());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let options = PaymentsOptions {
            broadcast_url: Some("not a url".into()),
            ..Default::default()
        };
        let err = PaymentsConfig::resolve(options).unwrap_err();
        assert!(err.to_string().contains("broadcastUrl"));
    }

    #[test]
    fn options_from_json() {
        let options =
            PaymentsOptions::from_json(r#"{"network":"testnet","feePerByte":50,"insightUrl":"http://localhost:3001/api/"}"#)
                .unwrap();
        assert_eq!(options.network.as_deref(), Some("testnet"));
        assert_eq!(options.fee_per_byte, Some(50));
        assert_eq!(options.insight_url.as_deref(), Some("http://localhost:3001/api/"));
        assert_eq!(options.backup_broadcast_url, None);
    }

    #[test]
    fn options_from_malformed_json() {
        assert!(matches!(
            PaymentsOptions::from_json("{\"feePerByte\": \"fast\"}"),
            Err(PaymentError::Configuration(_))
        ));
    }
}
