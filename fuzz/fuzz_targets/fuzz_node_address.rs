#![no_main]

use ampere_core::node_address::{looks_like_node_address, parse_scanned};
use ampere_core::NodeAddress;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match parse_scanned(text) {
        Some(address) => {
            assert!(looks_like_node_address(text));

            // Split happens at the first '@'
            assert!(!address.pubkey.contains('@'));
            assert_eq!(address.to_string(), text);

            let reparsed: Option<NodeAddress> = address.to_string().parse().ok();
            assert_eq!(reparsed, Some(address));
        }
        None => assert!(!looks_like_node_address(text)),
    }
});
