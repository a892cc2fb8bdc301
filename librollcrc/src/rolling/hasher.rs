//! rolling window hasher

use crate::core::{Crc32, CrcConfig, CrcResult, CrcTable};

use super::table::build_rolling_table_fast;

/// Everything needed to roll a window of a fixed size: the engine, the
/// window size and the matching rolling table. Built once, shared by any
/// number of `RollingCrc`s.
#[derive(Debug, Clone)]
pub struct RollingContext {
    engine: Crc32,
    rolling: CrcTable,
    window_size: usize,
}

impl RollingContext {
    pub fn new(config: &CrcConfig) -> CrcResult<Self> {
        config.validate()?;
        let engine = Crc32::new(config);
        let rolling = build_rolling_table_fast(&engine, config.window_size);
        Ok(RollingContext {
            engine,
            rolling,
            window_size: config.window_size,
        })
    }

    pub fn engine(&self) -> &Crc32 {
        &self.engine
    }

    pub fn rolling_table(&self) -> &CrcTable {
        &self.rolling
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Direct checksum of `data`
    pub fn crc(&self, data: &[u8]) -> u32 {
        self.engine.checksum(data)
    }

    /// Slide a raw (unfinished) window state by one byte
    #[inline(always)]
    pub fn roll(&self, state: u32, outgoing: u8, incoming: u8) -> u32 {
        self.engine.update(state, incoming) ^ self.rolling[outgoing as usize]
    }

    /// Finished checksum of every full window of `data`, in order.
    /// Empty when `data` is shorter than the window.
    pub fn window_checksums(&self, data: &[u8]) -> Vec<u32> {
        let w = self.window_size;
        if data.len() < w {
            return Vec::new();
        }

        let mut sums = Vec::with_capacity(data.len() - w + 1);
        let mut state = self.engine.update_slice(self.engine.init(), &data[..w]);
        sums.push(self.engine.finish(state));

        for i in w..data.len() {
            state = self.roll(state, data[i - w], data[i]);
            sums.push(self.engine.finish(state));
        }

        sums
    }

    pub fn hasher(&self) -> RollingCrc<'_> {
        RollingCrc::new(self)
    }
}

/// Byte-at-a-time rolling checksum over the last `window_size` bytes
#[derive(Debug, Clone)]
pub struct RollingCrc<'a> {
    ctx: &'a RollingContext,
    window: Vec<u8>,
    pos: usize,
    filled: usize,
    state: u32,
}

impl<'a> RollingCrc<'a> {
    pub fn new(ctx: &'a RollingContext) -> Self {
        RollingCrc {
            ctx,
            window: vec![0; ctx.window_size],
            pos: 0,
            filled: 0,
            state: ctx.engine.init(),
        }
    }

    /// Push one byte. Returns the checksum of the last `window_size` bytes
    /// once that many have been pushed.
    pub fn push(&mut self, byte: u8) -> Option<u32> {
        if self.filled < self.window.len() {
            self.state = self.ctx.engine.update(self.state, byte);
            self.filled += 1;
        } else {
            let outgoing = self.window[self.pos];
            self.state = self.ctx.roll(self.state, outgoing, byte);
        }

        self.window[self.pos] = byte;
        self.pos = (self.pos + 1) % self.window.len();

        self.value()
    }

    /// Push a slice, returning the checksum after the last byte
    pub fn extend(&mut self, data: &[u8]) -> Option<u32> {
        for &b in data {
            self.push(b);
        }
        self.value()
    }

    pub fn value(&self) -> Option<u32> {
        if self.is_full() {
            Some(self.ctx.engine.finish(self.state))
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.window.len()
    }

    pub fn reset(&mut self) {
        self.window.fill(0);
        self.pos = 0;
        self.filled = 0;
        self.state = self.ctx.engine.init();
    }
}
