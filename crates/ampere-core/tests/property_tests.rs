//! Property-based tests for ampere-core using proptest
//!
//! These tests verify invariants that should hold for all inputs.

use ampere_core::{
    invoice::PayReq,
    node_address::{parse_scanned, NodeAddress},
    payment::parse_custom_amount,
    units::{format_btc, format_sats, Units},
};
use proptest::prelude::*;

// ============================================
// Strategies
// ============================================

fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z0-9 ]{0,12}")
}

fn arb_optional_number() -> impl Strategy<Value = Option<u64>> {
    prop::option::of(0u64..5)
}

fn arb_pay_req() -> impl Strategy<Value = PayReq> {
    (
        arb_optional_number(),
        arb_optional_number(),
        arb_optional_number(),
        arb_optional_text(),
        arb_optional_text(),
        arb_optional_text(),
        arb_optional_number(),
    )
        .prop_map(
            |(num_satoshis, expiry, cltv_expiry, destination, description, payment_hash, timestamp)| {
                PayReq {
                    num_satoshis,
                    expiry,
                    cltv_expiry,
                    destination,
                    description,
                    payment_hash,
                    timestamp,
                }
            },
        )
}

// ============================================
// Node address heuristic
// ============================================

proptest! {
    #[test]
    fn scanned_text_with_at_and_colon_splits_on_first_at(
        pubkey in "[^@]{0,20}",
        rest in "[a-z0-9.@]{0,20}",
        port in "[0-9]{0,5}",
    ) {
        let data = format!("{}@{}:{}", pubkey, rest, port);
        let addr = parse_scanned(&data).expect("heuristic should accept");

        prop_assert_eq!(&addr.pubkey, &pubkey);
        prop_assert_eq!(addr.host, format!("{}:{}", rest, port));
    }

    #[test]
    fn scanned_text_without_at_is_rejected(data in "[^@]{0,40}") {
        prop_assert!(parse_scanned(&data).is_none());
    }

    #[test]
    fn scanned_text_without_colon_is_rejected(data in "[^:]{0,40}") {
        prop_assert!(parse_scanned(&data).is_none());
    }

    #[test]
    fn parse_never_panics(data in any::<String>()) {
        let _ = parse_scanned(&data);
        let _ = data.parse::<NodeAddress>();
    }

    #[test]
    fn accepted_address_displays_as_input(data in "[a-z0-9]{0,10}@[a-z0-9.:@]{0,20}") {
        if let Some(addr) = parse_scanned(&data) {
            prop_assert_eq!(addr.to_string(), data);
        }
    }
}

// ============================================
// Payment request fields
// ============================================

proptest! {
    #[test]
    fn present_fields_never_contain_falsy_values(pay_req in arb_pay_req()) {
        let normalized = pay_req.normalized();
        for (_, value) in normalized.present_fields() {
            prop_assert!(!value.is_empty());
        }

        let expected = normalized
            .labelled_fields()
            .iter()
            .filter(|(_, v)| v.is_some())
            .count();
        prop_assert_eq!(normalized.present_fields().len(), expected);
    }

    #[test]
    fn normalized_is_idempotent(pay_req in arb_pay_req()) {
        let once = pay_req.normalized();
        prop_assert_eq!(once.clone().normalized(), once);
    }

    #[test]
    fn decode_never_panics(data in "(lightning:)?ln[a-z0-9]{0,80}") {
        let _ = PayReq::decode(&data);
    }
}

// ============================================
// Amounts and units
// ============================================

proptest! {
    #[test]
    fn custom_amount_accepts_every_positive_integer(sats in 1u64..u64::MAX) {
        prop_assert_eq!(parse_custom_amount(&sats.to_string()).unwrap(), sats);
    }

    #[test]
    fn custom_amount_rejects_non_digits(input in "[a-zA-Z.\\-]{1,10}") {
        prop_assert!(parse_custom_amount(&input).is_err());
    }

    #[test]
    fn formatted_sats_keep_all_digits(sats in any::<u64>()) {
        let formatted = format_sats(sats);
        let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits, sats.to_string());
    }

    #[test]
    fn formatted_btc_has_eight_decimals(sats in any::<u64>()) {
        let formatted = format_btc(sats);
        let (_, decimals) = formatted.split_once('.').expect("decimal point");
        prop_assert_eq!(decimals.len(), 8);
    }

    #[test]
    fn unit_cycle_returns_to_start(fiat in any::<bool>()) {
        let steps = if fiat { 3 } else { 2 };
        let mut units = Units::Sats;
        for _ in 0..steps {
            units = units.next(fiat);
        }
        prop_assert_eq!(units, Units::Sats);
    }
}
