//! Per-instruction scan reports.
//!
//! A report keeps the full instruction listing with spans alongside the
//! totals, for callers that want to show *where* each instruction was
//! found and how many multiplies the disabled stretches suppressed.

use crate::accumulator::{Accumulator, Totals};
use memscan_core::ScanError;
use memscan_scanner::{Scanner, Token, TokenInfo};
use serde::Serialize;

/// Everything one scan learned about a buffer.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Every recognized instruction, in buffer order.
    pub tokens: Vec<TokenInfo>,
    /// Both totals.
    pub totals: Totals,
    /// Number of multiply instructions.
    pub mul_count: usize,
    /// Number of multiply instructions observed while disabled.
    pub suppressed_count: usize,
    /// Number of `do()` instructions.
    pub do_count: usize,
    /// Number of `don't()` instructions.
    pub dont_count: usize,
}

/// Scan a buffer and build the full report.
pub fn report(text: &[u8]) -> Result<ScanReport, ScanError> {
    if text.is_empty() {
        return Err(ScanError::EmptyBuffer);
    }

    let mut tokens = Vec::new();
    let mut acc = Accumulator::new();
    let mut mul_count = 0;
    let mut suppressed_count = 0;
    let mut do_count = 0;
    let mut dont_count = 0;

    for info in Scanner::new(text) {
        match info.token {
            Token::Do => do_count += 1,
            Token::Dont => dont_count += 1,
            Token::Mul { .. } => {
                mul_count += 1;
                if !acc.is_enabled() {
                    suppressed_count += 1;
                }
            }
        }
        acc.push(info.token);
        tokens.push(info);
    }

    Ok(ScanReport {
        tokens,
        totals: acc.finish(),
        mul_count,
        suppressed_count,
        do_count,
        dont_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let rep = report(b"mul(2,4)don't()mul(5,5)do()mul(1,1)").unwrap();
        assert_eq!(rep.tokens.len(), 5);
        assert_eq!(rep.mul_count, 3);
        assert_eq!(rep.suppressed_count, 1);
        assert_eq!(rep.do_count, 1);
        assert_eq!(rep.dont_count, 1);
        assert_eq!(rep.totals.unconditional, 34);
        assert_eq!(rep.totals.conditional, 9);
    }

    #[test]
    fn test_report_empty_buffer() {
        assert!(matches!(report(b""), Err(ScanError::EmptyBuffer)));
    }

    #[test]
    fn test_report_no_instructions() {
        let rep = report(b"nothing to see here").unwrap();
        assert!(rep.tokens.is_empty());
        assert_eq!(rep.totals, Totals::default());
    }
}
