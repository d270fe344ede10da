//! *Cardano fee and minUTxO calculations.*
//!
//! `cardano_fees` computes the minimum transaction fee and the minimum ADA an
//! output must carry (CIP-55) for the Babbage and Conway eras. Every function
//! is pure: callers supply [`ProtocolParams`] fetched from a node, an indexer
//! or one of the presets in [`params`], and receive exact [`Lovelace`]
//! amounts.
//!
//! ```
//! use cardano_fees::{fees, min_utxo, params::MAIN_NETWORK};
//!
//! let fee = fees::min_fee(&MAIN_NETWORK, 350).unwrap();
//! assert_eq!(fee.to_u64(), 170_781);
//!
//! let required = min_utxo::min_utxo_from_bytes(&MAIN_NETWORK, 125).unwrap();
//! assert_eq!(required.to_u64(), 1_228_350);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod amount;
pub mod fees;
pub mod min_utxo;
pub mod params;

pub use amount::Lovelace;
pub use params::ProtocolParams;
