use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode::serialize_hex;
use bitcoin::hashes::Hash;
use bitcoin::script::ScriptBuf;
use bitcoin::secp256k1::{Message, PublicKey, Secp256k1};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::transaction::Version;
use bitcoin::{Amount, CompressedPublicKey, Sequence, Transaction, TxIn, TxOut, Txid, Witness};
use tracing::debug;

use crate::address::{address_to_script_pubkey, WrappedSegwitScripts};
use crate::error::LtcError;
use crate::fee::relay_fee;
use crate::key::KeyMaterial;
use crate::network::LtcNetwork;
use crate::utxo::{total_value, Utxo};

/// A fully signed transaction ready for broadcast.
///
/// The serialized bytes and txid are fixed at construction; the only state
/// that ever changes is the `broadcasted` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw_hex: String,
    txid: Txid,
    fee: Amount,
    output_value: Amount,
    broadcasted: bool,
}

impl SignedTransaction {
    /// Consensus-serialized transaction as lowercase hex.
    pub fn raw_hex(&self) -> &str {
        &self.raw_hex
    }

    pub fn txid(&self) -> Txid {
        self.txid
    }

    /// Fee deducted from the requested amount.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Value paid to the destination (`amount - fee`).
    pub fn output_value(&self) -> Amount {
        self.output_value
    }

    pub fn is_broadcasted(&self) -> bool {
        self.broadcasted
    }

    /// Record that a broadcast endpoint accepted this transaction.
    pub fn mark_broadcasted(&mut self) {
        self.broadcasted = true;
    }
}

/// Build and sign a transaction spending every UTXO of a P2SH-P2WPKH key to a
/// single destination.
///
/// All `utxos` become inputs in the order given. The fee is estimated for
/// `utxos.len()` inputs and one output, floored at the relay minimum, and is
/// deducted from `amount`: the destination receives `amount - fee`. No change
/// output is created, so input value above `amount` is left to the miner.
///
/// The affordability check compares the net spend against the input total
/// (`amount - fee > total` fails). Callers rely on this exact threshold.
pub fn build_p2sh_p2wpkh_transaction(
    key: &KeyMaterial,
    network: LtcNetwork,
    destination: &str,
    amount: Amount,
    utxos: &[Utxo],
    fee_rate_sat_per_byte: u64,
) -> Result<SignedTransaction, LtcError> {
    if utxos.is_empty() {
        return Err(LtcError::NoUtxos);
    }

    let total = total_value(utxos)
        .ok_or_else(|| LtcError::TransactionBuildError("input values overflow".into()))?;

    let mut inputs = Vec::with_capacity(utxos.len());
    for utxo in utxos {
        inputs.push(TxIn {
            previous_output: utxo.outpoint()?,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::default(),
        });
    }

    let fee = relay_fee(fee_rate_sat_per_byte, utxos.len());
    let output_value = amount.checked_sub(fee).ok_or(LtcError::AmountBelowFee {
        amount: amount.to_sat(),
        fee: fee.to_sat(),
    })?;
    if output_value > total {
        return Err(LtcError::InsufficientFunds {
            have: total.to_sat(),
            need: output_value.to_sat(),
        });
    }

    let destination_script = address_to_script_pubkey(destination, network)?;

    debug!(
        inputs = utxos.len(),
        total_sat = total.to_sat(),
        fee_sat = fee.to_sat(),
        output_sat = output_value.to_sat(),
        "building P2SH-P2WPKH transaction"
    );

    let mut tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: inputs,
        output: vec![TxOut {
            value: output_value,
            script_pubkey: destination_script,
        }],
    };

    sign_inputs(&mut tx, key, utxos)?;

    let txid = tx.compute_txid();
    Ok(SignedTransaction {
        raw_hex: serialize_hex(&tx),
        txid,
        fee,
        output_value,
        broadcasted: false,
    })
}

/// Attach a P2SH-P2WPKH scriptSig and witness to every input.
///
/// Each input commits to its own prevout value through the BIP-143 digest.
fn sign_inputs(tx: &mut Transaction, key: &KeyMaterial, utxos: &[Utxo]) -> Result<(), LtcError> {
    let secp = Secp256k1::new();
    let secret_key = key.secret_key()?;
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    let scripts = WrappedSegwitScripts::for_public_key(&CompressedPublicKey(public_key));
    let script_sig = scripts.script_sig()?;

    let mut witnesses = Vec::with_capacity(utxos.len());
    let mut sighash_cache = SighashCache::new(&*tx);
    for (input_index, utxo) in utxos.iter().enumerate() {
        let sighash = sighash_cache
            .p2wpkh_signature_hash(
                input_index,
                &scripts.redeem_script,
                utxo.value(),
                EcdsaSighashType::All,
            )
            .map_err(|e| LtcError::SigningError(format!("sighash computation failed: {e}")))?;

        let msg = Message::from_digest(sighash.to_byte_array());
        let signature = secp.sign_ecdsa(&msg, &secret_key);

        let mut sig_bytes = signature.serialize_der().to_vec();
        sig_bytes.push(EcdsaSighashType::All as u8);

        let mut witness = Witness::new();
        witness.push(&sig_bytes);
        witness.push(public_key.serialize());
        witnesses.push(witness);
    }

    for (input, witness) in tx.input.iter_mut().zip(witnesses) {
        input.script_sig = script_sig.clone();
        input.witness = witness;
    }
    Ok(())
}
