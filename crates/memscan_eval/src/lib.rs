//! memscan_eval: Scan orchestration and accumulation.
//!
//! Drives a matcher over an instruction buffer and folds the token stream
//! through the enabled/disabled state machine, producing both totals in a
//! single pass. Works with either matcher backend (the direct byte scanner
//! or the regex scanner) and offers an optional partitioned parallel path
//! for large buffers.

mod accumulator;
pub mod parallel;
mod report;

pub use accumulator::{Accumulator, Totals};
pub use report::{report, ScanReport};

use memscan_core::ScanError;
use memscan_regex::RegexScanner;
use memscan_scanner::{Scanner, TokenInfo};

/// Which matcher backend drives the scan.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MatcherKind {
    /// Direct byte comparison against buffer offsets. The default.
    #[default]
    Direct,
    /// The single-alternation regex grammar.
    Regex,
}

/// Fold any ordered token stream into both totals.
///
/// This is the seam between the matcher and the state machine: the direct
/// scanner, the regex backend, and tests all feed it the same way.
pub fn accumulate<I>(tokens: I) -> Totals
where
    I: IntoIterator<Item = TokenInfo>,
{
    let mut acc = Accumulator::new();
    for info in tokens {
        acc.push(info.token);
    }
    acc.finish()
}

/// Scan a buffer with the direct matcher, producing both totals in one
/// fused pass.
pub fn scan_totals(text: &[u8]) -> Result<Totals, ScanError> {
    if text.is_empty() {
        return Err(ScanError::EmptyBuffer);
    }
    Ok(accumulate(Scanner::new(text)))
}

/// Scan a buffer with the chosen matcher backend.
pub fn scan_totals_with(kind: MatcherKind, text: &[u8]) -> Result<Totals, ScanError> {
    match kind {
        MatcherKind::Direct => scan_totals(text),
        MatcherKind::Regex => {
            if text.is_empty() {
                return Err(ScanError::EmptyBuffer);
            }
            Ok(accumulate(RegexScanner::new().tokens(text)))
        }
    }
}
