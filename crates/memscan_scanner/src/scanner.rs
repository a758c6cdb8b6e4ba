//! The instruction scanner.
//!
//! Walks a byte buffer left to right, reporting each recognized instruction
//! in order. At every candidate position it tries to match one of the three
//! patterns anchored there; if none matches, the cursor advances by exactly
//! one byte and the scan retries, so progress is guaranteed.

use crate::bytes::{is_digit, parse_digits, CLOSE_PAREN, COMMA, DO, DONT, MAX_OPERAND_DIGITS, MUL_OPEN};
use crate::token::{Token, TokenInfo};
use memscan_core::text::TextSpan;

/// Scans a byte buffer for instructions, skipping surrounding noise.
///
/// The buffer is borrowed immutably and never copied; matching compares
/// bytes in place.
pub struct Scanner<'a> {
    /// The buffer being scanned.
    text: &'a [u8],
    /// Current position in the buffer.
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner over the given buffer.
    pub fn new(text: &'a [u8]) -> Self {
        Self { text, pos: 0 }
    }

    /// Get the current position (start of the unscanned remainder).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Get the full buffer length.
    #[inline]
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Whether the scanner has consumed the whole buffer.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Scan forward to the next instruction and return it, or `None` when
    /// the buffer is exhausted.
    pub fn scan(&mut self) -> Option<TokenInfo> {
        while self.pos < self.text.len() {
            // Every pattern starts with 'm' or 'd'; jump straight to the
            // next possible start instead of stepping byte by byte.
            let candidate = match memchr::memchr2(b'm', b'd', &self.text[self.pos..]) {
                Some(offset) => self.pos + offset,
                None => {
                    self.pos = self.text.len();
                    return None;
                }
            };
            match match_token_at(self.text, candidate) {
                Some((token, len)) => {
                    self.pos = candidate + len;
                    let span = TextSpan::new(candidate as u32, len as u32);
                    return Some(TokenInfo::new(token, span));
                }
                None => self.pos = candidate + 1,
            }
        }
        None
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = TokenInfo;

    fn next(&mut self) -> Option<TokenInfo> {
        self.scan()
    }
}

/// Attempt to match a single instruction anchored at `pos`.
///
/// Returns the token and the exact number of bytes it consumes, or `None`
/// if no pattern matches there. Never looks backward and never reads past
/// the first structural mismatch.
pub fn match_token_at(text: &[u8], pos: usize) -> Option<(Token, usize)> {
    match text.get(pos) {
        Some(b'd') => match_control(&text[pos..]),
        Some(b'm') => match_mul(&text[pos..]),
        _ => None,
    }
}

/// Match `do()` or `don't()` at the start of `rest`.
fn match_control(rest: &[u8]) -> Option<(Token, usize)> {
    if rest.starts_with(DO) {
        return Some((Token::Do, DO.len()));
    }
    if rest.starts_with(DONT) {
        return Some((Token::Dont, DONT.len()));
    }
    None
}

/// Match `mul(A,B)` at the start of `rest`.
fn match_mul(rest: &[u8]) -> Option<(Token, usize)> {
    if !rest.starts_with(MUL_OPEN) {
        return None;
    }
    let (a, after_a) = match_operand(rest, MUL_OPEN.len())?;
    if rest.get(after_a) != Some(&COMMA) {
        return None;
    }
    let (b, after_b) = match_operand(rest, after_a + 1)?;
    if rest.get(after_b) != Some(&CLOSE_PAREN) {
        return None;
    }
    Some((Token::Mul { a, b }, after_b + 1))
}

/// Match a 1-3 digit operand starting at `pos` and return its value and the
/// position just past it. A longer digit run invalidates the candidate
/// entirely rather than matching a prefix of it.
fn match_operand(rest: &[u8], pos: usize) -> Option<(u32, usize)> {
    let mut end = pos;
    while end < rest.len() && is_digit(rest[end]) {
        end += 1;
    }
    let run = end - pos;
    if run == 0 || run > MAX_OPERAND_DIGITS {
        return None;
    }
    Some((parse_digits(&rest[pos..end]), end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_do() {
        assert_eq!(match_token_at(b"do()", 0), Some((Token::Do, 4)));
    }

    #[test]
    fn test_match_dont() {
        assert_eq!(match_token_at(b"don't()", 0), Some((Token::Dont, 7)));
    }

    #[test]
    fn test_dont_is_not_do() {
        // `don't()` shares the `do` prefix but must not match as `do()`.
        let (token, len) = match_token_at(b"don't()xyz", 0).unwrap();
        assert_eq!(token, Token::Dont);
        assert_eq!(len, 7);
    }

    #[test]
    fn test_match_mul() {
        assert_eq!(
            match_token_at(b"mul(2,4)", 0),
            Some((Token::Mul { a: 2, b: 4 }, 8))
        );
        assert_eq!(
            match_token_at(b"mul(999,999)", 0),
            Some((Token::Mul { a: 999, b: 999 }, 12))
        );
    }

    #[test]
    fn test_mul_consumed_length() {
        // 4 + len(A) + 1 + len(B) + 1
        let (_, len) = match_token_at(b"mul(12,345)", 0).unwrap();
        assert_eq!(len, 11);
    }

    #[test]
    fn test_mul_leading_zeros() {
        assert_eq!(
            match_token_at(b"mul(007,05)", 0),
            Some((Token::Mul { a: 7, b: 5 }, 11))
        );
    }

    #[test]
    fn test_mul_rejects_long_operand() {
        assert_eq!(match_token_at(b"mul(1000,1)", 0), None);
        assert_eq!(match_token_at(b"mul(1,1000)", 0), None);
    }

    #[test]
    fn test_mul_rejects_missing_pieces() {
        assert_eq!(match_token_at(b"mul(1,)", 0), None);
        assert_eq!(match_token_at(b"mul(,1)", 0), None);
        assert_eq!(match_token_at(b"mul(1 ,2)", 0), None);
        assert_eq!(match_token_at(b"mul(1,2", 0), None);
        assert_eq!(match_token_at(b"mul[3,7]", 0), None);
        assert_eq!(match_token_at(b"mul(3*7)", 0), None);
    }

    #[test]
    fn test_no_match_mid_buffer() {
        assert_eq!(match_token_at(b"xxdo()", 0), None);
        assert_eq!(match_token_at(b"xxdo()", 2), Some((Token::Do, 4)));
    }

    #[test]
    fn test_scan_skips_noise() {
        let mut scanner = Scanner::new(b"xmul(2,4)%&mul[3,7]!");
        let first = (&mut scanner).scan().unwrap();
        assert_eq!(first.token, Token::Mul { a: 2, b: 4 });
        assert_eq!(first.span.start, 1);
        assert_eq!(first.span.length, 8);
        assert_eq!((&mut scanner).scan(), None);
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_scan_empty() {
        let mut scanner = Scanner::new(b"");
        assert_eq!((&mut scanner).scan(), None);
    }

    #[test]
    fn test_iterator() {
        let tokens: Vec<Token> = Scanner::new(b"do()mul(3,3)don't()")
            .map(|info| info.token)
            .collect();
        assert_eq!(
            tokens,
            vec![Token::Do, Token::Mul { a: 3, b: 3 }, Token::Dont]
        );
    }

    #[test]
    fn test_failed_candidate_advances_one() {
        // `mulmul(2,3)`: the first `mul` fails at the `(` check, and the
        // scan must still find the instruction starting at offset 3.
        let tokens: Vec<TokenInfo> = Scanner::new(b"mulmul(2,3)").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, Token::Mul { a: 2, b: 3 });
        assert_eq!(tokens[0].span.start, 3);
    }
}
