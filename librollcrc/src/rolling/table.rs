// Rolling table construction
//
// rolling[c] is the XOR difference between "c followed by W zero bytes" and
// "W zero bytes alone", both folded from the initial state. XORing it into
// a state that has just absorbed the incoming byte removes the byte that
// left the window.

use log::debug;

use crate::core::{build_fast_table, Crc32, CrcTable, TABLE_LEN};

/// Entry for byte `c`, given `zeros` = init folded through `window` zeros
fn rolling_entry(engine: &Crc32, window: usize, c: u8, zeros: u32) -> u32 {
    let x = engine.update_zeros(engine.update(engine.init(), c), window);
    x ^ zeros
}

/// Brute force rolling table, O(256 * window)
pub fn build_rolling_table_slow(engine: &Crc32, window: usize) -> CrcTable {
    debug!("building rolling table by brute force, window {}", window);

    let zeros = engine.update_zeros(engine.init(), window);
    let mut table = [0u32; TABLE_LEN];
    for (c, entry) in table.iter_mut().enumerate() {
        *entry = rolling_entry(engine, window, c as u8, zeros);
    }

    table
}

/// Rolling table via the doubling construction, O(256 + window)
///
/// Only the entry at 128 is simulated. With a zero init that is the whole
/// story. Otherwise every entry carries the same constant (the entry for
/// byte 0), which is stripped before doubling and put back afterwards.
pub fn build_rolling_table_fast(engine: &Crc32, window: usize) -> CrcTable {
    let zeros = engine.update_zeros(engine.init(), window);
    let anchor = rolling_entry(engine, window, 128, zeros);
    let offset = if engine.init() == 0 {
        0
    } else {
        rolling_entry(engine, window, 0, zeros)
    };

    debug!(
        "building rolling table by doubling, window {}, anchor {:08x}, offset {:08x}",
        window, anchor, offset
    );

    let mut table = build_fast_table(anchor ^ offset);
    if offset != 0 {
        for entry in table.iter_mut() {
            *entry ^= offset;
        }
    }

    table
}
