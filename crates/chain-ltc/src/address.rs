use bitcoin::hashes::Hash;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::{CompressedPublicKey, PubkeyHash, ScriptBuf, ScriptHash};

use crate::error::LtcError;
use crate::key::KeyMaterial;
use crate::network::LtcNetwork;

/// The scripts that make up a P2SH-P2WPKH spend path for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSegwitScripts {
    /// `OP_0 <20-byte key hash>`, the witness program hidden behind the P2SH.
    pub redeem_script: ScriptBuf,
    /// `OP_HASH160 <hash160(redeem_script)> OP_EQUAL`, what the UTXOs lock to.
    pub script_pubkey: ScriptBuf,
}

impl WrappedSegwitScripts {
    pub fn for_public_key(public_key: &CompressedPublicKey) -> Self {
        let redeem_script = ScriptBuf::new_p2wpkh(&public_key.wpubkey_hash());
        let script_pubkey = ScriptBuf::new_p2sh(&redeem_script.script_hash());
        Self {
            redeem_script,
            script_pubkey,
        }
    }

    /// The scriptSig for inputs spending this output: a single push of the
    /// redeem script.
    pub fn script_sig(&self) -> Result<ScriptBuf, LtcError> {
        let push = PushBytesBuf::try_from(self.redeem_script.to_bytes())
            .map_err(|e| LtcError::TransactionBuildError(format!("redeem script push: {e}")))?;
        Ok(Builder::new().push_slice(push).into_script())
    }
}

/// Derive the P2SH-P2WPKH address (`M...` on mainnet, `Q...` on testnet) for a
/// compressed public key.
pub fn pubkey_to_p2sh_p2wpkh_address(public_key: &CompressedPublicKey, network: LtcNetwork) -> String {
    let scripts = WrappedSegwitScripts::for_public_key(public_key);
    let script_hash = scripts.redeem_script.script_hash();
    base58_address(network.p2sh_version(), &script_hash.to_byte_array())
}

/// Derive the P2SH-P2WPKH address controlled by `key`.
pub fn key_to_p2sh_p2wpkh_address(key: &KeyMaterial, network: LtcNetwork) -> Result<String, LtcError> {
    Ok(pubkey_to_p2sh_p2wpkh_address(&key.public_key()?, network))
}

fn base58_address(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}

/// Parse a Litecoin address into the locking script that pays it.
///
/// Accepts base58 P2PKH, both P2SH version bytes, and bech32 SegWit addresses.
/// Addresses for the other network are rejected.
pub fn address_to_script_pubkey(address: &str, network: LtcNetwork) -> Result<ScriptBuf, LtcError> {
    let hrp_prefix = format!("{}1", network.bech32_hrp());
    if address.to_lowercase().starts_with(&hrp_prefix) {
        return segwit_script_pubkey(address, network);
    }

    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| LtcError::InvalidAddress(format!("failed to parse address {address:?}: {e}")))?;

    let (version, hash) = match payload.as_slice() {
        [version, hash @ ..] if hash.len() == 20 => {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(hash);
            (*version, bytes)
        }
        _ => {
            return Err(LtcError::InvalidAddress(format!(
                "unexpected payload length {} for {address:?}",
                payload.len()
            )))
        }
    };

    if version == network.p2pkh_version() {
        Ok(ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(hash)))
    } else if version == network.p2sh_version() || version == network.legacy_p2sh_version() {
        Ok(ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(hash)))
    } else {
        Err(LtcError::InvalidAddress(format!(
            "version byte 0x{version:02x} is not a {network} address"
        )))
    }
}

fn segwit_script_pubkey(address: &str, network: LtcNetwork) -> Result<ScriptBuf, LtcError> {
    let (hrp, version, program) = bech32::segwit::decode(address)
        .map_err(|e| LtcError::InvalidAddress(format!("failed to parse address {address:?}: {e}")))?;

    if hrp.to_lowercase() != network.bech32_hrp() {
        return Err(LtcError::InvalidAddress(format!(
            "prefix {hrp} is not a {network} address"
        )));
    }

    let program = PushBytesBuf::try_from(program)
        .map_err(|e| LtcError::InvalidAddress(format!("witness program: {e}")))?;
    Ok(Builder::new()
        .push_int(i64::from(version.to_u8()))
        .push_slice(program)
        .into_script())
}

/// Check whether `address` is a well-formed address for `network`.
pub fn validate_address(address: &str, network: LtcNetwork) -> bool {
    address_to_script_pubkey(address, network).is_ok()
}
