use std::str::FromStr;

use crate::error::LtcError;

/// Supported Litecoin networks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LtcNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl LtcNetwork {
    /// Base58 version byte for pay-to-pubkey-hash addresses (`L...` / `m...`).
    pub fn p2pkh_version(self) -> u8 {
        match self {
            LtcNetwork::Mainnet => 0x30,
            LtcNetwork::Testnet => 0x6f,
        }
    }

    /// Base58 version byte for the script-hash addresses this crate derives
    /// (`M...` / `Q...`).
    pub fn p2sh_version(self) -> u8 {
        match self {
            LtcNetwork::Mainnet => 0x32,
            LtcNetwork::Testnet => 0x3a,
        }
    }

    /// Deprecated script-hash version shared with Bitcoin (`3...` / `2...`).
    /// Still accepted when parsing destinations.
    pub fn legacy_p2sh_version(self) -> u8 {
        match self {
            LtcNetwork::Mainnet => 0x05,
            LtcNetwork::Testnet => 0xc4,
        }
    }

    /// WIF private key version byte.
    pub fn wif_version(self) -> u8 {
        match self {
            LtcNetwork::Mainnet => 0xb0,
            LtcNetwork::Testnet => 0xef,
        }
    }

    /// Bech32 human-readable part for native SegWit addresses.
    pub fn bech32_hrp(self) -> &'static str {
        match self {
            LtcNetwork::Mainnet => "ltc",
            LtcNetwork::Testnet => "tltc",
        }
    }
}

impl FromStr for LtcNetwork {
    type Err = LtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(LtcNetwork::Mainnet),
            "testnet" => Ok(LtcNetwork::Testnet),
            other => Err(LtcError::InvalidNetwork(format!(
                "expected \"mainnet\" or \"testnet\", got {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for LtcNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LtcNetwork::Mainnet => write!(f, "mainnet"),
            LtcNetwork::Testnet => write!(f, "testnet"),
        }
    }
}
