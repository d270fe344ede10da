//! Abstractions and types related to fee calculations.
//!
//! The ledger charges `min_fee_a * size + min_fee_b` Lovelace for a
//! transaction of `size` serialized bytes. [`min_fee`] applies that formula
//! to a measured size; [`estimate_fee`] applies it to a size guessed from
//! the number of inputs and outputs.

use std::error;
use std::fmt;

use tracing::{debug, trace};

use crate::amount::Lovelace;
use crate::params::{ParamError, ProtocolParams};

pub mod linear;

/// Fixed overhead of a transaction body, witness set and envelope.
pub const BASE_TX_BYTES: u64 = 200;
/// Bytes per input, including its verification-key witness.
pub const BYTES_PER_INPUT: u64 = 140;
/// Bytes per output (address and value).
pub const BYTES_PER_OUTPUT: u64 = 65;
/// Bytes reserved for an auxiliary-data (metadata) payload.
pub const METADATA_BYTES: u64 = 250;

/// A trait that represents the ability to compute the fee that must be paid
/// by a transaction of a given serialized size.
pub trait FeeRule {
    type Error;

    /// Computes the fee required for a transaction of `tx_size_bytes` bytes
    /// under the given protocol parameters.
    fn fee_required(
        &self,
        params: &ProtocolParams,
        tx_size_bytes: u64,
    ) -> Result<Lovelace, Self::Error>;
}

/// Computes the minimum fee for a transaction of `tx_size_bytes` serialized
/// bytes: `min_fee_a * tx_size_bytes + min_fee_b`.
///
/// A common approach is to build the transaction with a placeholder fee,
/// measure its CBOR length, then recompute.
pub fn min_fee(params: &ProtocolParams, tx_size_bytes: u64) -> Result<Lovelace, FeeError> {
    params.validate()?;
    if tx_size_bytes == 0 {
        debug!("rejecting empty transaction size");
        return Err(FeeError::ZeroTxSize);
    }
    if tx_size_bytes > params.max_tx_size {
        debug!(
            tx_size_bytes,
            max_tx_size = params.max_tx_size,
            "transaction exceeds maximum size"
        );
        return Err(FeeError::TxTooLarge {
            size: tx_size_bytes,
            max: params.max_tx_size,
        });
    }

    let fee = params
        .min_fee_a
        .checked_mul(tx_size_bytes)
        .and_then(|v| v.checked_add(params.min_fee_b))
        .ok_or(FeeError::Overflow)?;
    debug!(tx_size_bytes, fee, "computed minimum fee");
    Ok(Lovelace::from_u64(fee))
}

/// Computes the minimum fee after adding `padding_bytes` to the transaction
/// size, for use before the final size (typically the witnesses) is known.
/// A margin of 100 to 200 bytes is common.
///
/// The padded size is subject to the same limits as in [`min_fee`].
pub fn min_fee_with_padding(
    params: &ProtocolParams,
    tx_size_bytes: u64,
    padding_bytes: u64,
) -> Result<Lovelace, FeeError> {
    params.validate()?;
    let padded = tx_size_bytes
        .checked_add(padding_bytes)
        .ok_or(FeeError::Overflow)?;
    min_fee(params, padded)
}

/// Estimates the serialized size of a transaction from its shape.
///
/// The model is a calibration against typical mainnet transactions, not an
/// exact serialization. Returns `None` if the estimate does not fit in a
/// `u64`.
pub fn estimate_tx_bytes(num_inputs: u64, num_outputs: u64, has_metadata: bool) -> Option<u64> {
    let inputs = BYTES_PER_INPUT.checked_mul(num_inputs)?;
    let outputs = BYTES_PER_OUTPUT.checked_mul(num_outputs)?;
    let metadata = if has_metadata { METADATA_BYTES } else { 0 };
    let size = BASE_TX_BYTES
        .checked_add(inputs)?
        .checked_add(outputs)?
        .checked_add(metadata)?;
    trace!(num_inputs, num_outputs, has_metadata, size, "estimated transaction size");
    Some(size)
}

/// Estimates the fee for a transaction with the given number of inputs and
/// outputs, with or without metadata.
///
/// This is a heuristic suitable for display and pre-flight checks. For the
/// exact fee, serialize the transaction and call [`min_fee`].
pub fn estimate_fee(
    params: &ProtocolParams,
    num_inputs: u64,
    num_outputs: u64,
    has_metadata: bool,
) -> Result<Lovelace, FeeError> {
    params.validate()?;
    if num_inputs == 0 {
        return Err(FeeError::NoInputs);
    }
    if num_outputs == 0 {
        return Err(FeeError::NoOutputs);
    }
    let size =
        estimate_tx_bytes(num_inputs, num_outputs, has_metadata).ok_or(FeeError::Overflow)?;
    min_fee(params, size)
}

/// Errors that can occur during fee calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeError {
    /// The protocol parameters are invalid.
    Params(ParamError),
    /// The transaction size was zero.
    ZeroTxSize,
    /// The transaction size exceeds the maximum allowed by the parameters.
    TxTooLarge { size: u64, max: u64 },
    /// A transaction must spend at least one input.
    NoInputs,
    /// A transaction must create at least one output.
    NoOutputs,
    /// The fee or the size it is computed from does not fit in a `u64`.
    Overflow,
}

impl fmt::Display for FeeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeeError::Params(e) => write!(f, "{}", e),
            FeeError::ZeroTxSize => write!(f, "transaction size must be greater than zero"),
            FeeError::TxTooLarge { size, max } => write!(
                f,
                "transaction size {} exceeds maximum of {} bytes",
                size, max
            ),
            FeeError::NoInputs => write!(f, "transaction must have at least one input"),
            FeeError::NoOutputs => write!(f, "transaction must have at least one output"),
            FeeError::Overflow => write!(f, "fee calculation overflowed"),
        }
    }
}

impl error::Error for FeeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            FeeError::Params(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamError> for FeeError {
    fn from(e: ParamError) -> Self {
        FeeError::Params(e)
    }
}
