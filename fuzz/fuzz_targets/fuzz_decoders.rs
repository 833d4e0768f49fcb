//! Fuzz testing for the body and token decoders.
//!
//! Every decoder here receives raw client input, so none of them may panic:
//! a failure must come back as an `Err` (or a lossy string).
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! # Install cargo-fuzz (requires nightly)
//! cargo +nightly install cargo-fuzz
//!
//! # Run the decoder fuzz target
//! cargo +nightly fuzz run fuzz_decoders
//!
//! # Run with a time limit (e.g., 60 seconds)
//! cargo +nightly fuzz run fuzz_decoders -- -max_total_time=60
//! ```
//!
//! # What This Tests
//!
//! - `decode_lossy`: echo body decoding
//! - `format_json`: JSON pretty printing
//! - `decode_jwt` / `decode_segment`: unverified JWT decoding
//! - `parse_json_body`: typed request parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use toolbox::models::{HashRequest, JwtDecodeRequest};
use toolbox::services::{decode_jwt, decode_lossy, decode_segment, format_json};
use toolbox::validation::parse_json_body;

fuzz_target!(|data: &[u8]| {
    // Lossy decoding must always produce valid UTF-8
    let text = decode_lossy(data);
    assert!(text.len() <= data.len());

    let _ = format_json(data);
    let _ = parse_json_body::<HashRequest>(data);
    let _ = parse_json_body::<JwtDecodeRequest>(data);

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decode_segment(s);

        if let Ok(jwt) = decode_jwt(s) {
            let _ = jwt.is_expired(i64::MAX);
            let _ = jwt.is_expired(i64::MIN);
        }
    }
});
