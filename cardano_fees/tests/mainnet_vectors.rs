use std::error::Error;

use cardano_fees::{
    amount::{format_ada, sum_lovelace},
    fees::{self, linear, FeeRule},
    min_utxo::{self, OutputSize, BASE_ADDRESS_BYTES},
    params::{Network, ProtocolParams},
    Lovelace,
};

fn mainnet() -> ProtocolParams {
    "mainnet".parse::<Network>().unwrap().params()
}

#[test]
fn worked_mainnet_example() {
    let params = mainnet();
    assert_eq!(fees::min_fee(&params, 350).unwrap().to_u64(), 170_781);
    assert_eq!(
        min_utxo::min_utxo_from_bytes(&params, 125).unwrap().to_u64(),
        1_228_350
    );
}

#[test]
fn fund_an_nft_output() {
    // Send an NFT with a 12 byte name plus change, paying a padded fee.
    let params = mainnet();
    let nft_output = OutputSize::ada_only(BASE_ADDRESS_BYTES).with_tokens(1, 1, 12);
    let change_output = OutputSize::ada_only(BASE_ADDRESS_BYTES);

    let nft_min = min_utxo::min_utxo(&params, &nft_output).unwrap();
    let (enough, required) =
        min_utxo::is_above_min_utxo(&params, Lovelace::from_u64(1_500_000), &nft_output).unwrap();
    assert!(enough);
    assert_eq!(required, nft_min);
    assert_eq!(nft_min, min_utxo::min_utxo_for_nft(&params, 12).unwrap());

    let fee = linear::FeeRule::padded(150)
        .fee_required(&params, fees::estimate_tx_bytes(1, 2, false).unwrap())
        .unwrap();
    let change_min = min_utxo::min_utxo(&params, &change_output).unwrap();

    let spend = sum_lovelace([nft_min, change_min, fee]).unwrap();
    assert_eq!(
        spend.to_u64(),
        nft_min.to_u64() + change_min.to_u64() + fee.to_u64()
    );
    assert_eq!(format_ada(Lovelace::from_u64(2_000_000)), "2.000000 ADA");
}

#[test]
fn calculations_are_deterministic() {
    let params = mainnet();
    let out = OutputSize::ada_only(BASE_ADDRESS_BYTES)
        .with_tokens(3, 10, 120)
        .with_inline_datum(64);
    let first = (
        fees::estimate_fee(&params, 3, 2, true),
        min_utxo::min_utxo(&params, &out),
    );
    for _ in 0..10 {
        assert_eq!(
            (
                fees::estimate_fee(&params, 3, 2, true),
                min_utxo::min_utxo(&params, &out),
            ),
            first
        );
    }
}

#[test]
fn errors_are_std_errors() {
    let err: Box<dyn Error> =
        Box::new(fees::min_fee(&ProtocolParams::new(0, 1, 1, 1), 1).unwrap_err());
    assert!(err.source().is_some());

    let err: Box<dyn Error> =
        Box::new(min_utxo::min_utxo_for_bundle(&mainnet(), 0, 1, 0).unwrap_err());
    assert!(err.source().is_none());
}
