//! Protocol parameters and network presets.
//!
//! Only the four parameters that enter the fee and minUTxO formulas are
//! modelled. Live values change through on-chain governance, so production
//! callers should fetch them from a node or indexer; the presets here are
//! reference values for the Conway era.

use std::error;
use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};

/// The subset of Cardano protocol parameters needed for fee and minUTxO
/// calculations. All amounts are denominated in Lovelace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct ProtocolParams {
    /// Fee coefficient per transaction byte (`a` in `a * size + b`).
    pub min_fee_a: u64,
    /// Constant fee term (`b` in `a * size + b`).
    pub min_fee_b: u64,
    /// Cost per byte of UTxO storage (Babbage and later).
    pub coins_per_utxo_byte: u64,
    /// Maximum serialized transaction size in bytes.
    pub max_tx_size: u64,
}

/// Mainnet parameters as of the Conway era.
pub const MAIN_NETWORK: ProtocolParams = ProtocolParams::new(44, 155_381, 4_310, 16_384);

/// Preview testnet parameters as of the Conway era.
pub const PREVIEW_NETWORK: ProtocolParams = ProtocolParams::new(44, 155_381, 4_310, 16_384);

impl ProtocolParams {
    pub const fn new(
        min_fee_a: u64,
        min_fee_b: u64,
        coins_per_utxo_byte: u64,
        max_tx_size: u64,
    ) -> Self {
        ProtocolParams {
            min_fee_a,
            min_fee_b,
            coins_per_utxo_byte,
            max_tx_size,
        }
    }

    /// Returns the preset parameters for the given network.
    pub const fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => MAIN_NETWORK,
            Network::Preview => PREVIEW_NETWORK,
        }
    }

    /// Checks that every parameter is non-zero.
    ///
    /// Fields are checked in declaration order and the first zero field is
    /// reported.
    pub fn validate(&self) -> Result<(), ParamError> {
        let fields = [
            (ParamField::MinFeeA, self.min_fee_a),
            (ParamField::MinFeeB, self.min_fee_b),
            (ParamField::CoinsPerUtxoByte, self.coins_per_utxo_byte),
            (ParamField::MaxTxSize, self.max_tx_size),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ParamError::new(*field, "must be non-zero")),
            None => Ok(()),
        }
    }
}

/// Networks with a bundled parameter preset.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Network {
    Mainnet,
    Preview,
}

impl Network {
    pub const fn params(self) -> ProtocolParams {
        ProtocolParams::for_network(self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Preview => write!(f, "preview"),
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mainnet") {
            Ok(Network::Mainnet)
        } else if s.eq_ignore_ascii_case("preview") {
            Ok(Network::Preview)
        } else {
            Err(UnknownNetwork(s.to_owned()))
        }
    }
}

/// Returned when parsing a network name that has no preset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownNetwork(pub String);

impl fmt::Display for UnknownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown network {:?}", self.0)
    }
}

impl error::Error for UnknownNetwork {}

/// Identifies a field of [`ProtocolParams`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamField {
    MinFeeA,
    MinFeeB,
    CoinsPerUtxoByte,
    MaxTxSize,
}

impl ParamField {
    pub const fn name(self) -> &'static str {
        match self {
            ParamField::MinFeeA => "min_fee_a",
            ParamField::MinFeeB => "min_fee_b",
            ParamField::CoinsPerUtxoByte => "coins_per_utxo_byte",
            ParamField::MaxTxSize => "max_tx_size",
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A [`ProtocolParams`] field holds an unusable value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamError {
    field: ParamField,
    message: &'static str,
}

impl ParamError {
    pub const fn new(field: ParamField, message: &'static str) -> Self {
        ParamError { field, message }
    }

    /// The offending field.
    pub fn field(&self) -> ParamField {
        self.field
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid protocol param {}: {}",
            self.field, self.message
        )
    }
}

impl error::Error for ParamError {}

#[cfg(any(test, feature = "test-dependencies"))]
pub mod testing {
    use proptest::prelude::prop_compose;

    use super::ProtocolParams;

    prop_compose! {
        /// Valid parameters small enough that no formula in this crate can
        /// overflow for transactions up to `max_tx_size` bytes.
        pub fn arb_protocol_params()(
            min_fee_a in 1u64..1_000,
            min_fee_b in 1u64..10_000_000,
            coins_per_utxo_byte in 1u64..100_000,
            max_tx_size in 1u64..1_000_000,
        ) -> ProtocolParams {
            ProtocolParams::new(min_fee_a, min_fee_b, coins_per_utxo_byte, max_tx_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use borsh::BorshDeserialize;
    use proptest::prelude::*;

    use super::{
        testing::arb_protocol_params, Network, ParamError, ParamField, ProtocolParams,
        MAIN_NETWORK, PREVIEW_NETWORK,
    };

    #[test]
    fn presets_are_valid() {
        assert_eq!(MAIN_NETWORK.validate(), Ok(()));
        assert_eq!(PREVIEW_NETWORK.validate(), Ok(()));
        assert_eq!(Network::Mainnet.params(), MAIN_NETWORK);
        assert_eq!(ProtocolParams::for_network(Network::Preview), PREVIEW_NETWORK);
    }

    #[test]
    fn reports_first_zero_field() {
        let err = ProtocolParams::new(0, 0, 0, 0).validate().unwrap_err();
        assert_eq!(err.field(), ParamField::MinFeeA);

        let partial = ProtocolParams {
            min_fee_a: 44,
            ..ProtocolParams::new(0, 0, 0, 0)
        };
        assert_matches!(partial.validate(), Err(e) if e.field() == ParamField::MinFeeB);

        let cases = [
            (ProtocolParams::new(44, 155_381, 0, 16_384), ParamField::CoinsPerUtxoByte),
            (ProtocolParams::new(44, 155_381, 4_310, 0), ParamField::MaxTxSize),
        ];
        for (params, field) in cases {
            assert_eq!(
                params.validate(),
                Err(ParamError::new(field, "must be non-zero"))
            );
        }
    }

    #[test]
    fn param_error_names_field() {
        let err = ProtocolParams::new(44, 155_381, 0, 16_384)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid protocol param coins_per_utxo_byte: must be non-zero"
        );
    }

    #[test]
    fn network_names() {
        assert_eq!("mainnet".parse(), Ok(Network::Mainnet));
        assert_eq!("Preview".parse(), Ok(Network::Preview));
        assert!("preprod".parse::<Network>().is_err());
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }

    proptest! {
        #[test]
        fn borsh_preserves_params(params in arb_protocol_params()) {
            let bytes = borsh::to_vec(&params).unwrap();
            prop_assert_eq!(bytes.len(), 32);
            prop_assert_eq!(ProtocolParams::try_from_slice(&bytes).unwrap(), params);
        }
    }
}
