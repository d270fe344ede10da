use crate::{
    amount::Lovelace,
    fees::{min_fee_with_padding, FeeError},
    params::ProtocolParams,
};

/// The ledger's linear fee rule, optionally charging for a number of
/// padding bytes on top of the measured transaction size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeRule {
    padding_bytes: u64,
}

impl FeeRule {
    /// Creates the standard rule, which charges for the measured size only.
    pub fn standard() -> Self {
        Self { padding_bytes: 0 }
    }

    /// Creates a rule that charges for `padding_bytes` extra bytes, for
    /// sizing fees before witnesses are attached.
    pub fn padded(padding_bytes: u64) -> Self {
        Self { padding_bytes }
    }

    /// Returns the number of padding bytes with which this rule was configured.
    pub fn padding_bytes(&self) -> u64 {
        self.padding_bytes
    }
}

impl super::FeeRule for FeeRule {
    type Error = FeeError;

    fn fee_required(
        &self,
        params: &ProtocolParams,
        tx_size_bytes: u64,
    ) -> Result<Lovelace, Self::Error> {
        min_fee_with_padding(params, tx_size_bytes, self.padding_bytes)
    }
}
