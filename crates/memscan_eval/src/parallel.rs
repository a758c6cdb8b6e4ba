//! Partitioned scanning for large buffers.
//!
//! The buffer is split into fixed-size chunks. A chunk owns every
//! instruction that *starts* inside it; since the longest instruction is
//! `mul(ddd,ddd)`, each chunk reads at most `MAX_TOKEN_LEN - 1` bytes past
//! its end to finish a straddling match. No instruction can start strictly
//! inside another matched instruction (none of the literals recur in a
//! match's interior), so the union of per-chunk token streams equals the
//! sequential stream.
//!
//! Conditional state cannot be known until the chunks to the left are
//! folded, so each chunk reports its multiply sums split by dependence on
//! the incoming state, and a sequential fold threads the enabled flag
//! through the summaries.

use crate::accumulator::Totals;
use memscan_core::ScanError;
use memscan_scanner::{Scanner, Token, MAX_TOKEN_LEN};
use rayon::prelude::*;

/// Default chunk length for the parallel scan.
pub const DEFAULT_CHUNK_LEN: usize = 64 * 1024;

/// Per-chunk scan results, awaiting the incoming enabled state.
#[derive(Debug, Copy, Clone, Default)]
struct ChunkSummary {
    /// Sum of all multiply products in the chunk.
    sum_all: u64,
    /// Products seen before the chunk's first control instruction; they
    /// count toward the conditional total only if the chunk is entered
    /// enabled.
    sum_inherited: u64,
    /// Products seen after a control instruction put the chunk into a
    /// locally-known enabled state.
    sum_enabled: u64,
    /// The state the chunk leaves behind, or `None` if it contains no
    /// control instruction and passes the incoming state through.
    exit_state: Option<bool>,
}

/// Scan one chunk: instructions starting in `[start, end)`, with read
/// access past `end` so a straddling instruction can complete.
fn scan_chunk(text: &[u8], start: usize, end: usize) -> ChunkSummary {
    let window_end = (end + MAX_TOKEN_LEN - 1).min(text.len());
    let local_end = (end - start) as u32;
    let mut summary = ChunkSummary::default();
    let mut local_state: Option<bool> = None;

    for info in Scanner::new(&text[start..window_end]) {
        if info.span.start >= local_end {
            break;
        }
        match info.token {
            Token::Do => local_state = Some(true),
            Token::Dont => local_state = Some(false),
            Token::Mul { a, b } => {
                let product = u64::from(a) * u64::from(b);
                summary.sum_all += product;
                match local_state {
                    None => summary.sum_inherited += product,
                    Some(true) => summary.sum_enabled += product,
                    Some(false) => {}
                }
            }
        }
    }

    summary.exit_state = local_state;
    summary
}

/// Fold chunk summaries left to right, threading the enabled flag.
fn fold_summaries(summaries: &[ChunkSummary]) -> Totals {
    let mut totals = Totals::default();
    let mut enabled = true;
    for summary in summaries {
        totals.unconditional += summary.sum_all;
        totals.conditional += summary.sum_enabled;
        if enabled {
            totals.conditional += summary.sum_inherited;
        }
        enabled = summary.exit_state.unwrap_or(enabled);
    }
    totals
}

/// Scan a buffer in parallel chunks of `chunk_len` bytes.
///
/// Produces exactly the totals of the sequential scan, for any chunk
/// length of at least one byte.
pub fn scan_totals_chunked(text: &[u8], chunk_len: usize) -> Result<Totals, ScanError> {
    if text.is_empty() {
        return Err(ScanError::EmptyBuffer);
    }
    let chunk_len = chunk_len.max(1);

    let starts: Vec<usize> = (0..text.len()).step_by(chunk_len).collect();
    let summaries: Vec<ChunkSummary> = starts
        .par_iter()
        .map(|&start| scan_chunk(text, start, (start + chunk_len).min(text.len())))
        .collect();

    Ok(fold_summaries(&summaries))
}

/// Scan a buffer in parallel with the default chunk length.
pub fn scan_totals(text: &[u8]) -> Result<Totals, ScanError> {
    scan_totals_chunked(text, DEFAULT_CHUNK_LEN)
}
