//! memscan_scanner: Direct byte-level matcher for corrupted instruction streams.
//!
//! Recognizes three fixed instruction patterns anchored at arbitrary buffer
//! positions, skipping over surrounding noise:
//! - `mul(A,B)` with two 1-3 digit decimal operands
//! - `do()`
//! - `don't()`
//!
//! This is the performance-oriented path: candidates are located with
//! `memchr` and validated by comparing bytes in place, with no allocation
//! per candidate position.

mod bytes;
mod scanner;
mod token;

pub use bytes::MAX_TOKEN_LEN;
pub use scanner::{match_token_at, Scanner};
pub use token::{Token, TokenInfo};
