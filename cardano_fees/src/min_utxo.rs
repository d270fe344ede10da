//! Minimum ADA per output (minUTxO) for the Babbage and Conway eras.
//!
//! [CIP-55] fixes the minimum Lovelace an output must carry at
//!
//! ```text
//! (160 + serialized_output_bytes) * coins_per_utxo_byte
//! ```
//!
//! where the 160 bytes account for the UTxO map entry overhead. When the
//! CBOR size of the output is known use [`min_utxo_from_bytes`]; otherwise
//! [`min_utxo`] derives it from an [`OutputSize`] with
//! [`estimate_output_bytes`].
//!
//! [CIP-55]: https://cips.cardano.org/cip/CIP-55

use std::error;
use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use tracing::{debug, trace};

use crate::amount::Lovelace;
use crate::params::{ParamError, ProtocolParams};

/// Per-entry overhead of the UTxO map charged on top of the output itself.
pub const UTXO_ENTRY_OVERHEAD_BYTES: u64 = 160;
/// Length of a Shelley base address (payment and stake credentials).
pub const BASE_ADDRESS_BYTES: u64 = 57;
/// Length of a Shelley enterprise address (payment credential only).
pub const ENTERPRISE_ADDRESS_BYTES: u64 = 29;
/// The ledger's upper bound on the length of an asset name.
pub const MAX_ASSET_NAME_BYTES: u64 = 32;

const ENVELOPE_BYTES: u64 = 10;
const COIN_BYTES: u64 = 9;
const TOKEN_BUNDLE_BYTES: u64 = 5;
const POLICY_ID_BYTES: u64 = 28;
const ASSET_OVERHEAD_BYTES: u64 = 12;
const ASSET_QUANTITY_BYTES: u64 = 5;
const DATUM_HASH_BYTES: u64 = 32;

/// The datum attached to an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub enum Datum {
    /// A 32-byte datum hash.
    Hash,
    /// An inline datum of the given serialized length.
    Inline { bytes: u64 },
}

/// Describes the components of a transaction output that contribute to its
/// serialized size.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct OutputSize {
    /// Length of the output address in bytes.
    pub address_bytes: u64,
    /// Number of distinct minting policies in the token bundle.
    pub num_policies: u64,
    /// Number of distinct assets across all policies.
    pub num_assets: u64,
    /// Sum of the lengths of all asset names.
    pub total_asset_name_bytes: u64,
    /// Datum attached to the output, if any.
    pub datum: Option<Datum>,
    /// Serialized length of the reference script, if any.
    pub script_ref_bytes: Option<u64>,
}

impl OutputSize {
    /// An output carrying only ADA.
    pub fn ada_only(address_bytes: u64) -> Self {
        OutputSize {
            address_bytes,
            ..Default::default()
        }
    }

    pub fn with_tokens(
        mut self,
        num_policies: u64,
        num_assets: u64,
        total_asset_name_bytes: u64,
    ) -> Self {
        self.num_policies = num_policies;
        self.num_assets = num_assets;
        self.total_asset_name_bytes = total_asset_name_bytes;
        self
    }

    pub fn with_datum_hash(mut self) -> Self {
        self.datum = Some(Datum::Hash);
        self
    }

    pub fn with_inline_datum(mut self, bytes: u64) -> Self {
        self.datum = Some(Datum::Inline { bytes });
        self
    }

    pub fn with_script_ref(mut self, bytes: u64) -> Self {
        self.script_ref_bytes = Some(bytes);
        self
    }

    fn has_tokens(&self) -> bool {
        self.num_assets > 0 || self.num_policies > 0
    }
}

/// Estimates the CBOR size of an output from its components.
///
/// The model follows the Mary/Babbage output layout: a 10 byte envelope, the
/// address, a 9 byte coin, and for multi-asset outputs 5 bytes of bundle
/// framing, 28 bytes per policy id, 17 bytes per asset plus its name. A
/// datum hash adds 32 bytes; inline datums and reference scripts add their
/// own length. It is an estimate, not a serialization.
///
/// Never fails: the result saturates at `u64::MAX`, which
/// [`min_utxo_from_bytes`] then reports as an overflow.
pub fn estimate_output_bytes(out: &OutputSize) -> u64 {
    let mut total = ENVELOPE_BYTES
        .saturating_add(out.address_bytes)
        .saturating_add(COIN_BYTES);

    if out.has_tokens() {
        total = total
            .saturating_add(TOKEN_BUNDLE_BYTES)
            .saturating_add(POLICY_ID_BYTES.saturating_mul(out.num_policies))
            .saturating_add(ASSET_OVERHEAD_BYTES.saturating_mul(out.num_assets))
            .saturating_add(out.total_asset_name_bytes)
            .saturating_add(ASSET_QUANTITY_BYTES.saturating_mul(out.num_assets));
    }

    match out.datum {
        Some(Datum::Hash) => total = total.saturating_add(DATUM_HASH_BYTES),
        Some(Datum::Inline { bytes }) => total = total.saturating_add(bytes),
        None => {}
    }
    if let Some(bytes) = out.script_ref_bytes {
        total = total.saturating_add(bytes);
    }

    trace!(?out, total, "estimated output size");
    total
}

/// Computes the minimum Lovelace for an output whose CBOR encoding is
/// `serialized_bytes` long.
pub fn min_utxo_from_bytes(
    params: &ProtocolParams,
    serialized_bytes: u64,
) -> Result<Lovelace, MinUtxoError> {
    params.validate()?;
    if serialized_bytes == 0 {
        debug!("rejecting empty output size");
        return Err(MinUtxoError::ZeroOutputBytes);
    }

    let required = UTXO_ENTRY_OVERHEAD_BYTES
        .checked_add(serialized_bytes)
        .and_then(|v| v.checked_mul(params.coins_per_utxo_byte))
        .ok_or(MinUtxoError::Overflow)?;
    debug!(serialized_bytes, required, "computed minimum UTxO value");
    Ok(Lovelace::from_u64(required))
}

/// Computes the minimum Lovelace for the described output, estimating its
/// size with [`estimate_output_bytes`].
pub fn min_utxo(params: &ProtocolParams, out: &OutputSize) -> Result<Lovelace, MinUtxoError> {
    params.validate()?;
    min_utxo_from_bytes(params, estimate_output_bytes(out))
}

/// Minimum Lovelace for an ADA-only output to a base address.
pub fn min_utxo_ada_only(params: &ProtocolParams) -> Result<Lovelace, MinUtxoError> {
    min_utxo(params, &OutputSize::ada_only(BASE_ADDRESS_BYTES))
}

/// Minimum Lovelace for an output to a base address holding a single NFT
/// (one policy, one asset) whose name is `asset_name_len` bytes.
pub fn min_utxo_for_nft(
    params: &ProtocolParams,
    asset_name_len: u64,
) -> Result<Lovelace, MinUtxoError> {
    if asset_name_len > MAX_ASSET_NAME_BYTES {
        return Err(MinUtxoError::AssetNameTooLong {
            len: asset_name_len,
            max: MAX_ASSET_NAME_BYTES,
        });
    }
    min_utxo(
        params,
        &OutputSize::ada_only(BASE_ADDRESS_BYTES).with_tokens(1, 1, asset_name_len),
    )
}

/// Minimum Lovelace for an output to a base address holding a bundle of
/// native tokens.
pub fn min_utxo_for_bundle(
    params: &ProtocolParams,
    num_policies: u64,
    num_assets: u64,
    total_asset_name_bytes: u64,
) -> Result<Lovelace, MinUtxoError> {
    if num_policies == 0 {
        return Err(MinUtxoError::NoPolicies);
    }
    if num_assets == 0 {
        return Err(MinUtxoError::NoAssets);
    }
    min_utxo(
        params,
        &OutputSize::ada_only(BASE_ADDRESS_BYTES).with_tokens(
            num_policies,
            num_assets,
            total_asset_name_bytes,
        ),
    )
}

/// Checks whether `amount` covers the minimum for the described output.
///
/// Returns the outcome together with the required amount so callers can
/// report the shortfall.
pub fn is_above_min_utxo(
    params: &ProtocolParams,
    amount: Lovelace,
    out: &OutputSize,
) -> Result<(bool, Lovelace), MinUtxoError> {
    let required = min_utxo(params, out)?;
    Ok((amount >= required, required))
}

/// Errors that can occur during minUTxO calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinUtxoError {
    /// The protocol parameters are invalid.
    Params(ParamError),
    /// The serialized output size was zero.
    ZeroOutputBytes,
    /// A token bundle needs at least one policy.
    NoPolicies,
    /// A token bundle needs at least one asset.
    NoAssets,
    /// An asset name is longer than the ledger allows.
    AssetNameTooLong { len: u64, max: u64 },
    /// The required amount does not fit in a `u64`.
    Overflow,
}

impl fmt::Display for MinUtxoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MinUtxoError::Params(e) => write!(f, "{}", e),
            MinUtxoError::ZeroOutputBytes => {
                write!(f, "minUTxO: serialized output size must be greater than zero")
            }
            MinUtxoError::NoPolicies => write!(f, "minUTxO: bundle must have at least one policy"),
            MinUtxoError::NoAssets => write!(f, "minUTxO: bundle must have at least one asset"),
            MinUtxoError::AssetNameTooLong { len, max } => write!(
                f,
                "minUTxO: asset name length {} exceeds maximum of {} bytes",
                len, max
            ),
            MinUtxoError::Overflow => write!(f, "minUTxO: calculation overflowed"),
        }
    }
}

impl error::Error for MinUtxoError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MinUtxoError::Params(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamError> for MinUtxoError {
    fn from(e: ParamError) -> Self {
        MinUtxoError::Params(e)
    }
}

#[cfg(any(test, feature = "test-dependencies"))]
pub mod testing {
    use proptest::prelude::*;

    use super::{Datum, OutputSize};

    pub fn arb_datum() -> impl Strategy<Value = Option<Datum>> {
        prop_oneof![
            Just(None),
            Just(Some(Datum::Hash)),
            (0u64..10_000).prop_map(|bytes| Some(Datum::Inline { bytes })),
        ]
    }

    prop_compose! {
        pub fn arb_output_size()(
            address_bytes in 1u64..128,
            num_policies in 0u64..16,
            num_assets in 0u64..64,
            total_asset_name_bytes in 0u64..2_048,
            datum in arb_datum(),
            script_ref_bytes in proptest::option::of(0u64..16_384),
        ) -> OutputSize {
            OutputSize {
                address_bytes,
                num_policies,
                num_assets,
                total_asset_name_bytes,
                datum,
                script_ref_bytes,
            }
        }
    }
}
