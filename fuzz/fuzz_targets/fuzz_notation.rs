#![no_main]

//! Action notation fuzzer.
//!
//! Any string either fails to parse or parses to an action whose notation
//! parses back to itself.

use jungle::Action;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Ok(action) = text.parse::<Action>() {
        let again: Action = action
            .to_string()
            .parse()
            .unwrap_or_else(|e| panic!("{action} does not reparse: {e}"));
        assert_eq!(again, action);
    }
});
