//! The accumulator state machine.
//!
//! Consumes the ordered instruction stream and maintains the enabled flag:
//! `do()` enables, `don't()` disables (both idempotent), and every `mul`
//! adds its product to the unconditional total while only multiplies seen
//! in the enabled state reach the conditional total.

use memscan_scanner::Token;
use serde::Serialize;

/// The two totals produced by one pass over a buffer.
///
/// `unconditional` counts every multiply; `conditional` counts only those
/// observed while enabled. Both only ever grow, so
/// `unconditional >= conditional` holds for every buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of all multiply products, ignoring control instructions.
    pub unconditional: u64,
    /// Sum of multiply products observed while enabled.
    pub conditional: u64,
}

/// Consumes instructions one at a time and accumulates both totals.
///
/// The enabled flag starts true and lives here, scoped to one scan; there
/// is no process-wide state.
#[derive(Debug, Clone)]
pub struct Accumulator {
    enabled: bool,
    totals: Totals,
}

impl Accumulator {
    /// Create an accumulator in the initial (enabled) state.
    pub fn new() -> Self {
        Self {
            enabled: true,
            totals: Totals::default(),
        }
    }

    /// Whether multiplies currently count toward the conditional total.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Feed one instruction through the state machine.
    pub fn push(&mut self, token: Token) {
        match token {
            Token::Do => self.enabled = true,
            Token::Dont => self.enabled = false,
            Token::Mul { a, b } => {
                let product = u64::from(a) * u64::from(b);
                self.totals.unconditional += product;
                if self.enabled {
                    self.totals.conditional += product;
                }
            }
        }
    }

    /// Finish the pass and return both totals.
    pub fn finish(self) -> Totals {
        self.totals
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
