// Table-driven checksum engine
//
// The state is a raw u32. `init` seeds it, `update` folds one byte, `finish`
// XORs the initial value back out. Rolling works on raw states, so anything
// that slides a window must hold the state before `finish`.

use super::config::CrcConfig;
use super::table::build_fast_table;
use super::types::{CrcTable, CRC32_POLY};

/// Fold one byte into `state` using `table`
#[inline(always)]
pub fn update(state: u32, table: &CrcTable, byte: u8) -> u32 {
    table[((state ^ byte as u32) & 0xff) as usize] ^ (state >> 8)
}

/// A base table plus the initial value it is used with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crc32 {
    table: CrcTable,
    init: u32,
}

impl Crc32 {
    /// Engine for `config`, table built with the doubling construction
    pub fn new(config: &CrcConfig) -> Self {
        Self::with_table(build_fast_table(config.polynomial()), config.init)
    }

    /// Engine over an already built table
    pub fn with_table(table: CrcTable, init: u32) -> Self {
        Crc32 { table, init }
    }

    /// zip/png CRC-32
    pub fn zip() -> Self {
        Self::new(&CrcConfig::zip())
    }

    pub fn table(&self) -> &CrcTable {
        &self.table
    }

    pub fn polynomial(&self) -> u32 {
        CRC32_POLY
    }

    /// Starting state
    #[inline]
    pub fn init(&self) -> u32 {
        self.init
    }

    #[inline(always)]
    pub fn update(&self, state: u32, byte: u8) -> u32 {
        update(state, &self.table, byte)
    }

    /// Fold every byte of `data` into `state`
    pub fn update_slice(&self, state: u32, data: &[u8]) -> u32 {
        data.iter().fold(state, |crc, &b| update(crc, &self.table, b))
    }

    /// `count` zero bytes, used by the rolling builders
    pub fn update_zeros(&self, state: u32, count: usize) -> u32 {
        (0..count).fold(state, |crc, _| update(crc, &self.table, 0))
    }

    #[inline]
    pub fn finish(&self, state: u32) -> u32 {
        state ^ self.init
    }

    /// Checksum of a whole buffer. Empty input gives `finish(init())`.
    pub fn checksum(&self, data: &[u8]) -> u32 {
        self.finish(self.update_slice(self.init(), data))
    }

    /// Incremental digest
    pub fn digest(&self) -> Digest<'_> {
        Digest {
            engine: self,
            state: self.init(),
            len: 0,
        }
    }
}

/// Streaming checksum over pieces of input
#[derive(Debug, Clone)]
pub struct Digest<'a> {
    engine: &'a Crc32,
    state: u32,
    len: u64,
}

impl Digest<'_> {
    pub fn write(&mut self, data: &[u8]) {
        self.state = self.engine.update_slice(self.state, data);
        self.len += data.len() as u64;
    }

    /// bytes consumed so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finished checksum of everything written, the digest stays usable
    pub fn value(&self) -> u32 {
        self.engine.finish(self.state)
    }
}
