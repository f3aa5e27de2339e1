use bip32::{DerivationPath, XPrv};
use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use bitcoin::CompressedPublicKey;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::LtcError;
use crate::network::LtcNetwork;

/// Suffix appended to a WIF payload when the key's public half is compressed.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A secp256k1 private key used to derive the wrapped-SegWit address and sign
/// its inputs.
///
/// The scalar is validated on construction and wiped from memory when the
/// value is dropped. It is never logged: `Debug` prints a placeholder.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    secret: [u8; 32],
}

impl KeyMaterial {
    /// Wrap a raw 32-byte secp256k1 scalar.
    pub fn from_bytes(secret: [u8; 32]) -> Result<Self, LtcError> {
        SecretKey::from_slice(&secret)
            .map_err(|e| LtcError::InvalidPrivateKey(format!("invalid secret key: {e}")))?;
        Ok(Self { secret })
    }

    /// Decode a Litecoin WIF string for the given network.
    ///
    /// Only compressed-key WIFs are accepted: a P2WPKH program commits to the
    /// compressed public key.
    pub fn from_wif(wif: &str, network: LtcNetwork) -> Result<Self, LtcError> {
        let mut payload = bs58::decode(wif)
            .with_check(None)
            .into_vec()
            .map_err(|e| LtcError::InvalidPrivateKey(format!("malformed WIF: {e}")))?;

        let result = Self::from_wif_payload(&payload, network);
        payload.zeroize();
        result
    }

    fn from_wif_payload(payload: &[u8], network: LtcNetwork) -> Result<Self, LtcError> {
        match payload {
            [version, ..] if *version != network.wif_version() => {
                Err(LtcError::InvalidPrivateKey(format!(
                    "WIF version 0x{version:02x} is not valid for {network}"
                )))
            }
            [_, key @ .., WIF_COMPRESSED_FLAG] if key.len() == 32 => {
                let mut secret = [0u8; 32];
                secret.copy_from_slice(key);
                let result = Self::from_bytes(secret);
                secret.zeroize();
                result
            }
            [_, key @ ..] if key.len() == 32 => Err(LtcError::InvalidPrivateKey(
                "uncompressed WIF keys cannot back a P2SH-P2WPKH address".into(),
            )),
            _ => Err(LtcError::InvalidPrivateKey(format!(
                "unexpected WIF payload length {}",
                payload.len()
            ))),
        }
    }

    /// Take the private key out of a BIP-32 extended private key node.
    pub fn from_xprv(node: &XPrv) -> Result<Self, LtcError> {
        let mut secret: [u8; 32] = node.to_bytes().into();
        let result = Self::from_bytes(secret);
        secret.zeroize();
        result
    }

    /// Derive the key at `path` (e.g. `m/49'/2'/0'/0/0`) from a BIP-32 seed.
    pub fn from_seed(seed: &[u8], path: &str) -> Result<Self, LtcError> {
        let path: DerivationPath = path
            .parse()
            .map_err(|e: bip32::Error| LtcError::InvalidPrivateKey(format!("bad path: {e}")))?;
        let node = XPrv::derive_from_path(seed, &path)
            .map_err(|e| LtcError::InvalidPrivateKey(format!("derivation failed: {e}")))?;
        Self::from_xprv(&node)
    }

    /// Encode as a compressed-key WIF string.
    pub fn to_wif(&self, network: LtcNetwork) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(network.wif_version());
        payload.extend_from_slice(&self.secret);
        payload.push(WIF_COMPRESSED_FLAG);
        let wif = bs58::encode(&payload).with_check().into_string();
        payload.zeroize();
        wif
    }

    pub(crate) fn secret_key(&self) -> Result<SecretKey, LtcError> {
        SecretKey::from_slice(&self.secret)
            .map_err(|e| LtcError::InvalidPrivateKey(format!("invalid secret key: {e}")))
    }

    /// The compressed public key matching this private key.
    pub fn public_key(&self) -> Result<CompressedPublicKey, LtcError> {
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &self.secret_key()?);
        Ok(CompressedPublicKey(public_key))
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE_WIF_MAINNET: &str = "T33ydQRKp4FCW5LCLLUB7deioUMoveiwekdwUwyfRDeGZm76aUjV";
    const KEY_ONE_WIF_TESTNET: &str = "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA";

    fn key_one() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        bytes
    }

    #[test]
    fn wif_mainnet_test_vector() {
        let key = KeyMaterial::from_bytes(key_one()).unwrap();
        assert_eq!(key.to_wif(LtcNetwork::Mainnet), KEY_ONE_WIF_MAINNET);
        assert_eq!(key.to_wif(LtcNetwork::Testnet), KEY_ONE_WIF_TESTNET);
    }

    #[test]
    fn from_wif_roundtrip() {
        let key = KeyMaterial::from_wif(KEY_ONE_WIF_MAINNET, LtcNetwork::Mainnet).unwrap();
        assert_eq!(key.to_wif(LtcNetwork::Mainnet), KEY_ONE_WIF_MAINNET);
    }

    #[test]
    fn from_wif_rejects_other_network() {
        let err = KeyMaterial::from_wif(KEY_ONE_WIF_MAINNET, LtcNetwork::Testnet).unwrap_err();
        assert!(matches!(err, LtcError::InvalidPrivateKey(_)));
    }

    #[test]
    fn from_wif_rejects_bitcoin_wif() {
        let btc_wif = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
        assert!(KeyMaterial::from_wif(btc_wif, LtcNetwork::Mainnet).is_err());
    }

    #[test]
    fn from_wif_rejects_uncompressed_key() {
        let uncompressed = "6u823ozcyt2rjPH8Z2ErsSXJB5PPQwK7VVTwwN4mxLBFrao69XQ";
        let err = KeyMaterial::from_wif(uncompressed, LtcNetwork::Mainnet).unwrap_err();
        assert!(err.to_string().contains("uncompressed"));
    }

    #[test]
    fn from_wif_rejects_bad_checksum() {
        let mut corrupted = KEY_ONE_WIF_MAINNET.to_string();
        corrupted.pop();
        corrupted.push('W');
        assert!(KeyMaterial::from_wif(&corrupted, LtcNetwork::Mainnet).is_err());
    }

    #[test]
    fn zero_key_is_rejected() {
        assert!(KeyMaterial::from_bytes([0u8; 32]).is_err());
    }

    #[test]
    fn public_key_of_key_one_is_generator() {
        let key = KeyMaterial::from_bytes(key_one()).unwrap();
        let pk = key.public_key().unwrap();
        assert_eq!(
            hex::encode(pk.to_bytes()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    /// BIP-32 test vector 1, chain m/0'.
    #[test]
    fn from_seed_bip32_test_vector() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let derived = KeyMaterial::from_seed(&seed, "m/0'").unwrap();

        let expected: [u8; 32] =
            hex::decode("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
                .unwrap()
                .try_into()
                .unwrap();
        let expected = KeyMaterial::from_bytes(expected).unwrap();

        assert_eq!(
            derived.to_wif(LtcNetwork::Mainnet),
            expected.to_wif(LtcNetwork::Mainnet)
        );
    }

    #[test]
    fn from_seed_rejects_garbage_path() {
        let seed = [0x11u8; 32];
        assert!(KeyMaterial::from_seed(&seed, "not/a/path").is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = KeyMaterial::from_bytes([0xcd; 32]).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("cd"));
        assert!(debug.contains("KeyMaterial"));
    }
}
