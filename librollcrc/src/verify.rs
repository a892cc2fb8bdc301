//! cross checks between independently computed artifacts
//!
//! Every builder has an independent counterpart. A disagreement is a broken
//! invariant, never a transient condition, so it is reported as data and
//! turned into an error by `VerifyReport::into_result`.

use std::fmt;

use log::{debug, error};
use serde::Serialize;

use crate::core::{
    build_fast_table, build_reference_table, find_doubling_violation, Crc32, CrcConfig,
    CrcResult, CrcTable, TableKind,
};
use crate::rolling::{build_rolling_table_fast, build_rolling_table_slow};

/// bytes past the first window checked by `self_test` unless told otherwise
pub const DEFAULT_EXTRA_BYTES: usize = 200;

/// Deterministic test buffer, `11 + 31*i + i/17` truncated to a byte
pub fn test_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (11 + 31 * i + i / 17) as u8).collect()
}

/// One disagreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// entry differs between the two builders of a table
    Table {
        table: TableKind,
        index: usize,
        expected: u32,
        actual: u32,
    },
    /// table breaks `t[i + j] == t[i] ^ t[j]`
    Structure { table: TableKind, index: usize },
    /// direct and rolled checksum of the window at `offset` differ
    Window {
        offset: usize,
        direct: u32,
        rolled: u32,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Table {
                table,
                index,
                expected,
                actual,
            } => write!(f, "{}: {:02x} {:08x} {:08x}", table.tag(), index, expected, actual),
            Mismatch::Structure { table, index } => {
                write!(f, "{}: doubling structure broken at {:02x}", table.tag(), index)
            }
            Mismatch::Window {
                offset,
                direct,
                rolled,
            } => write!(
                f,
                "roll @{}: {:08x} and {:08x} ARE NOT EQUAL!",
                offset, direct, rolled
            ),
        }
    }
}

/// Entry by entry comparison
pub fn compare_tables(kind: TableKind, expected: &CrcTable, actual: &CrcTable) -> Vec<Mismatch> {
    expected
        .iter()
        .zip(actual.iter())
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .map(|(index, (&expected, &actual))| Mismatch::Table {
            table: kind,
            index,
            expected,
            actual,
        })
        .collect()
}

/// Bitwise reference table vs doubling table
pub fn verify_base_tables(poly: u32) -> Vec<Mismatch> {
    let reference = build_reference_table(poly);
    let fast = build_fast_table(poly);

    let mut mismatches = compare_tables(TableKind::Base, &reference, &fast);
    if let Some(index) = find_doubling_violation(&fast) {
        mismatches.push(Mismatch::Structure {
            table: TableKind::Base,
            index,
        });
    }
    mismatches
}

/// Brute force vs doubling rolling table for `window`
pub fn verify_rolling_tables(engine: &Crc32, window: usize) -> Vec<Mismatch> {
    let slow = build_rolling_table_slow(engine, window);
    let fast = build_rolling_table_fast(engine, window);

    let mut mismatches = compare_tables(TableKind::Rolling, &slow, &fast);
    if engine.init() == 0 {
        if let Some(index) = find_doubling_violation(&slow) {
            mismatches.push(Mismatch::Structure {
                table: TableKind::Rolling,
                index,
            });
        }
    }
    mismatches
}

/// Every window of `buffer`, checksummed directly and by rolling forward
/// from the first window. Returns the windows checked and the mismatches.
pub fn verify_rolling_window(
    engine: &Crc32,
    rolling: &CrcTable,
    window: usize,
    buffer: &[u8],
) -> (usize, Vec<Mismatch>) {
    if window == 0 || buffer.len() < window {
        return (0, Vec::new());
    }

    let mut mismatches = Vec::new();
    let mut state = engine.update_slice(engine.init(), &buffer[..window]);

    let windows = buffer.len() - window + 1;
    for offset in 0..windows {
        if offset > 0 {
            let outgoing = buffer[offset - 1];
            let incoming = buffer[offset + window - 1];
            state = engine.update(state, incoming) ^ rolling[outgoing as usize];
        }

        let direct = engine.checksum(&buffer[offset..offset + window]);
        let rolled = engine.finish(state);
        if direct != rolled {
            mismatches.push(Mismatch::Window {
                offset,
                direct,
                rolled,
            });
        }
    }

    (windows, mismatches)
}

/// Outcome of a full self test
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub polynomial: u32,
    pub window_size: usize,
    pub init: u32,
    pub windows_checked: usize,
    /// direct checksum of the last window
    pub final_direct: u32,
    /// rolled checksum of the last window
    pub final_rolled: u32,
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Err describing the first mismatch if there are any
    pub fn into_result(self) -> CrcResult<Self> {
        match self.mismatches.first() {
            None => Ok(self),
            Some(first) => Err(format!(
                "{} mismatch(es) for window {}, first: {}",
                self.mismatches.len(),
                self.window_size,
                first
            )),
        }
    }
}

/// Check all builders against each other and roll over a pattern buffer of
/// `window_size + extra` bytes.
pub fn self_test(config: &CrcConfig, extra: usize) -> CrcResult<VerifyReport> {
    config.validate()?;
    let window = config.window_size;

    let mut mismatches = verify_base_tables(config.polynomial());

    let engine = Crc32::with_table(build_reference_table(config.polynomial()), config.init);
    mismatches.extend(verify_rolling_tables(&engine, window));

    let rolling = build_rolling_table_fast(&engine, window);
    let buffer = test_pattern(window + extra);
    let (windows_checked, window_mismatches) =
        verify_rolling_window(&engine, &rolling, window, &buffer);
    mismatches.extend(window_mismatches);

    let final_direct = engine.checksum(&buffer[extra..]);
    let mut state = engine.update_slice(engine.init(), &buffer[..window]);
    for i in 0..extra {
        state = engine.update(state, buffer[window + i]) ^ rolling[buffer[i] as usize];
    }
    let final_rolled = engine.finish(state);

    for m in &mismatches {
        error!("{}", m);
    }
    debug!(
        "self test window {} init {:08x}: {} windows, {} mismatches",
        window,
        config.init,
        windows_checked,
        mismatches.len()
    );

    Ok(VerifyReport {
        polynomial: config.polynomial(),
        window_size: window,
        init: config.init,
        windows_checked,
        final_direct,
        final_rolled,
        mismatches,
    })
}
