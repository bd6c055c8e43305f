#![no_main]

use ampere_core::invoice::normalize_payment_request;
use ampere_core::payment::parse_custom_amount;
use ampere_core::PayReq;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let normalized = normalize_payment_request(text);
    assert_eq!(normalized.trim(), normalized);
    assert!(text.contains(normalized));

    if let Ok(pay_req) = PayReq::decode(text) {
        // Decoded fields are already normalized and never falsy
        assert_eq!(pay_req.clone().normalized(), pay_req);
        for (_, value) in pay_req.present_fields() {
            assert!(!value.is_empty());
        }
    }

    if let Ok(sats) = parse_custom_amount(text) {
        assert!(sats > 0);
    }
});
