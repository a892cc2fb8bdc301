// Table construction for the reflected CRC-32
//
// Two independent builders: the textbook bit-at-a-time one, and the
// doubling construction which only computes the eight power-of-two slots and
// fills the rest with XOR combinations. The doubling one works for any table
// whose entries are the image of a GF(2)-linear map of the byte, which is
// what lets the rolling table reuse it.

use log::debug;

use super::types::{CrcTable, CRC32_POLY, TABLE_LEN};

/// One bit round of the reflected CRC: shift right, fold the polynomial
/// back in if the dropped bit was set.
#[inline]
pub fn bit_step(r: u32, poly: u32) -> u32 {
    (r >> 1) ^ (poly & (r & 1).wrapping_neg())
}

/// Bitwise reference table, eight rounds of `bit_step` per entry
pub fn build_reference_table(poly: u32) -> CrcTable {
    let mut table = [0u32; TABLE_LEN];

    for (i, entry) in table.iter_mut().enumerate() {
        let mut r = i as u32;
        for _ in 0..8 {
            r = bit_step(r, poly);
        }
        *entry = r;
    }

    table
}

/// Doubling construction from the entry at index 128
///
/// `step` maps the entry for bit `k` to the entry for bit `k - 1`. Slots
/// 64, 32, .., 1 are filled by repeated steps, then every composite index
/// `i + j` (with `i` a power of two and `j < i`) is `table[i] ^ table[j]`.
pub fn doubling_build<F>(seed: u32, step: F) -> CrcTable
where
    F: Fn(u32) -> u32,
{
    let mut table = [0u32; TABLE_LEN];

    let mut r = seed;
    table[128] = r;

    let mut i = 64;
    while i > 0 {
        r = step(r);
        table[i] = r;
        i >>= 1;
    }

    let mut i = 2;
    while i < TABLE_LEN {
        for j in 1..i {
            table[i + j] = table[i] ^ table[j];
        }
        i <<= 1;
    }

    table
}

/// Doubling table for the fixed CRC-32 polynomial, seeded at index 128.
/// With `seed == CRC32_POLY` this is the standard CRC-32 table.
pub fn build_fast_table(seed: u32) -> CrcTable {
    debug!("building doubling table from seed {:08x}", seed);
    doubling_build(seed, |r| bit_step(r, CRC32_POLY))
}

/// First index violating `table[i + j] == table[i] ^ table[j]`, if any.
/// Also checks `table[0] == 0`.
pub fn find_doubling_violation(table: &CrcTable) -> Option<usize> {
    if table[0] != 0 {
        return Some(0);
    }

    let mut i = 1;
    while i < TABLE_LEN {
        for j in 0..i {
            if table[i + j] != table[i] ^ table[j] {
                return Some(i + j);
            }
        }
        i <<= 1;
    }

    None
}

/// true when the table has the doubling structure
pub fn has_doubling_structure(table: &CrcTable) -> bool {
    find_doubling_violation(table).is_none()
}
