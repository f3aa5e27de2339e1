//! Size-band fee estimation.
//!
//! A heuristic, not a protocol rule: fixed per-input and per-output byte
//! weights give a `[min, max]` size band, and the fee is the rounded-up mean
//! of the band times the rate.
//!
//! Segwit sizes come out in quarter bytes, so the band is kept in weight
//! units (4 × bytes) where every value is an integer.

use bitcoin::{Amount, Weight};

/// Fee rate applied when neither the caller nor configuration supplies one.
pub const DEFAULT_FEE_RATE_SAT_PER_BYTE: u64 = 30;

/// Floor applied to every fee actually attached to a transaction.
pub const MIN_RELAY_FEE: Amount = Amount::from_sat(1_000);

const VERSION_BYTES: u64 = 4;
const LOCKTIME_BYTES: u64 = 4;
const OUTPUT_COUNT_BYTES: u64 = 1;
const SEGWIT_MARKER_FLAG_BYTES: u64 = 2;

const SEGWIT_INPUT_BYTES: u64 = 59;
const SEGWIT_INPUT_WITNESS_BYTES_MIN: u64 = 106;
const SEGWIT_INPUT_WITNESS_BYTES_MAX: u64 = 108;
const LEGACY_INPUT_BYTES_MIN: u64 = 146;
const LEGACY_INPUT_BYTES_MAX: u64 = 148;
const OUTPUT_BYTES_MIN: u64 = 31;
const OUTPUT_BYTES_MAX: u64 = 33;

/// Estimated size range of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBand {
    pub min: Weight,
    pub max: Weight,
}

impl SizeBand {
    /// `ceil((min + max) / 2)` in bytes.
    pub fn mean_bytes(&self) -> u64 {
        (self.min.to_wu() + self.max.to_wu()).div_ceil(8)
    }

    /// Lower bound in (possibly fractional) bytes.
    pub fn min_bytes(&self) -> f64 {
        self.min.to_wu() as f64 / 4.0
    }

    /// Upper bound in (possibly fractional) bytes.
    pub fn max_bytes(&self) -> f64 {
        self.max.to_wu() as f64 / 4.0
    }
}

/// Length of the input-count varint. The `< 0xffff` bound is deliberate.
fn varint_len(count: u64) -> u64 {
    if count < 0xfd {
        1
    } else if count < 0xffff {
        3
    } else {
        5
    }
}

/// Estimate the size band of a transaction with the given shape.
pub fn estimate_size(input_count: usize, output_count: usize, segwit: bool) -> SizeBand {
    let inputs = input_count as u64;
    let outputs = output_count as u64;
    let varint = varint_len(inputs);

    if segwit {
        let base = varint + VERSION_BYTES + SEGWIT_MARKER_FLAG_BYTES + SEGWIT_INPUT_BYTES * inputs
            + OUTPUT_COUNT_BYTES
            + LOCKTIME_BYTES;
        let min_no_witness = base + OUTPUT_BYTES_MIN * outputs;
        let max_no_witness = base + OUTPUT_BYTES_MAX * outputs;
        let min_witness = min_no_witness + SEGWIT_INPUT_WITNESS_BYTES_MIN * inputs;
        let max_witness = max_no_witness + SEGWIT_INPUT_WITNESS_BYTES_MAX * inputs;

        // size = (3 * non_witness + witness) / 4, held as 4 * size.
        SizeBand {
            min: Weight::from_wu(3 * min_no_witness + min_witness),
            max: Weight::from_wu(3 * max_no_witness + max_witness),
        }
    } else {
        let base = varint + VERSION_BYTES + OUTPUT_COUNT_BYTES + LOCKTIME_BYTES;
        let min = base + LEGACY_INPUT_BYTES_MIN * inputs + OUTPUT_BYTES_MIN * outputs;
        let max = base + LEGACY_INPUT_BYTES_MAX * inputs + OUTPUT_BYTES_MAX * outputs;

        SizeBand {
            min: Weight::from_non_witness_data_size(min),
            max: Weight::from_non_witness_data_size(max),
        }
    }
}

/// Estimate the fee for a transaction shape at `fee_rate_sat_per_byte`.
///
/// The result is not floored; use [`relay_fee`] for the fee that is actually
/// attached to a transaction.
pub fn estimate_fee(
    fee_rate_sat_per_byte: u64,
    input_count: usize,
    output_count: usize,
    segwit: bool,
) -> Amount {
    let band = estimate_size(input_count, output_count, segwit);
    Amount::from_sat(band.mean_bytes().saturating_mul(fee_rate_sat_per_byte))
}

/// Clamp an estimated fee to [`MIN_RELAY_FEE`].
pub fn clamp_to_relay_floor(fee: Amount) -> Amount {
    fee.max(MIN_RELAY_FEE)
}

/// The fee charged for a P2SH-P2WPKH spend of `input_count` inputs to a single
/// output.
pub fn relay_fee(fee_rate_sat_per_byte: u64, input_count: usize) -> Amount {
    clamp_to_relay_floor(estimate_fee(fee_rate_sat_per_byte, input_count, 1, true))
}
