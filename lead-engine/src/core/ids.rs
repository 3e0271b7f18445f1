//! Identifier policy
//!
//! | Entity | Format | Source |
//! |--------|--------|--------|
//! | Employee | `EMP001` | monotonic sequence, never decremented |
//! | Lead | `L{batch_ts}-{row}` | ingest batch timestamp + row index |
//! | Feedback | `F{ts}-{seq}` | timestamp + monotonic sequence |
//!
//! Employee ids used to be derived from the current head-count, which
//! reissues a freed id after a deletion. The sequence here only moves
//! forward, so deleted ids stay retired.

const EMPLOYEE_PREFIX: &str = "EMP";

/// Identifier generator injected into the engine
pub trait IdGenerator: Send + Sync {
    fn next_employee_id(&mut self) -> String;

    fn lead_id(&self, batch_ts: i64, row_index: usize) -> String {
        format!("L{}-{}", batch_ts, row_index)
    }

    fn next_feedback_id(&mut self, timestamp: i64) -> String;
}

/// Default counter-based generator
#[derive(Debug, Clone)]
pub struct SequentialIds {
    employee_seq: u64,
    feedback_seq: u64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialIds {
    pub fn new() -> Self {
        Self {
            employee_seq: 0,
            feedback_seq: 0,
        }
    }

    /// Continue from previously issued high-water marks
    ///
    /// The marks come from [`crate::store::EntityStore`], which records every
    /// issued id, so ids of deleted employees and feedback stay retired.
    pub fn resume(employee_seq: u64, feedback_seq: u64) -> Self {
        Self {
            employee_seq,
            feedback_seq,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_employee_id(&mut self) -> String {
        self.employee_seq += 1;
        format_employee_id(self.employee_seq)
    }

    fn next_feedback_id(&mut self, timestamp: i64) -> String {
        self.feedback_seq += 1;
        format!("F{}-{}", timestamp, self.feedback_seq)
    }
}

/// `7` → `EMP007`; widths beyond three digits are kept as-is
pub fn format_employee_id(seq: u64) -> String {
    format!("{}{:03}", EMPLOYEE_PREFIX, seq)
}

/// `EMP042` → `42`
pub fn parse_employee_seq(id: &str) -> Option<u64> {
    id.strip_prefix(EMPLOYEE_PREFIX)?.parse().ok()
}

/// `F1717200000000-7` → `7`
pub fn parse_feedback_seq(id: &str) -> Option<u64> {
    let (_, seq) = id.strip_prefix('F')?.rsplit_once('-')?;
    seq.parse().ok()
}
