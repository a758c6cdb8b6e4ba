//! memscan_regex: Regex-backed matcher for corrupted instruction streams.
//!
//! An alternative backend implementing the same token-stream contract as
//! the direct byte scanner. The three patterns collapse into a single
//! alternation scanned left to right, so tokens come out in buffer order
//! without a separate sort.
//!
//! The direct scanner is the default path; this backend exists for
//! differential testing and for callers that prefer the one-liner grammar.

use memscan_core::text::TextSpan;
use memscan_scanner::{Token, TokenInfo};
use regex::bytes::{CaptureMatches, Regex};

/// The instruction grammar as one alternation. Operand groups are bounded
/// to 1-3 digits; a longer run cannot match because the delimiter must
/// follow the group immediately.
const INSTRUCTION_PATTERN: &str = r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)";

/// A compiled regex matcher over instruction streams.
///
/// Compile once, scan any number of buffers.
pub struct RegexScanner {
    re: Regex,
}

impl RegexScanner {
    /// Compile the instruction grammar.
    pub fn new() -> Self {
        // The pattern is a constant; compilation cannot fail.
        let re = Regex::new(INSTRUCTION_PATTERN).expect("instruction pattern must compile");
        Self { re }
    }

    /// Iterate over the instructions in `text`, in buffer order.
    pub fn tokens<'r, 't>(&'r self, text: &'t [u8]) -> Tokens<'r, 't> {
        Tokens {
            inner: self.re.captures_iter(text),
        }
    }

    /// Collect all instructions in `text`.
    pub fn scan_all(&self, text: &[u8]) -> Vec<TokenInfo> {
        self.tokens(text).collect()
    }
}

impl Default for RegexScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator adapter turning regex captures into `TokenInfo`.
pub struct Tokens<'r, 't> {
    inner: CaptureMatches<'r, 't>,
}

impl<'r, 't> Iterator for Tokens<'r, 't> {
    type Item = TokenInfo;

    fn next(&mut self) -> Option<TokenInfo> {
        let caps = self.inner.next()?;
        let whole = caps.get(0)?;
        let token = match (caps.get(1), caps.get(2)) {
            (Some(a), Some(b)) => Token::Mul {
                a: parse_operand(a.as_bytes()),
                b: parse_operand(b.as_bytes()),
            },
            _ if whole.as_bytes() == b"do()" => Token::Do,
            _ => Token::Dont,
        };
        let span = TextSpan::from_bounds(whole.start() as u32, whole.end() as u32);
        Some(TokenInfo::new(token, span))
    }
}

/// Parse a 1-3 digit capture as an unsigned integer.
fn parse_operand(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}
