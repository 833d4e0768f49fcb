//! Pure utility operations behind the HTTP handlers.
//!
//! Each function takes already-extracted input and returns a value or a
//! client error. None of them touch shared state; the only ambient inputs are
//! the clock and the random number generator.

pub mod digest;
pub mod generate;
pub mod jwt;
pub mod text;

pub use digest::{HashAlgorithm, hex_digest};
pub use generate::{MAX_UUID_COUNT, MIN_UUID_COUNT, generate_uuids};
pub use jwt::{DecodedJwt, decode_jwt, decode_segment};
pub use text::{decode_lossy, format_json};
