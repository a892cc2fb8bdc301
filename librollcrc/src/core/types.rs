//! common types for the crc engine

// constants

/// Reflected CRC-32 polynomial (ISO 3309 / zip / png)
pub const CRC32_POLY: u32 = 0xEDB8_8320;

/// Initial value for the plain linear CRC (finish is a no-op)
pub const INIT_ZERO: u32 = 0;

/// Initial value for the zip/rar/7-zip convention, gives standard CRC-32
pub const INIT_ONES: u32 = 0xFFFF_FFFF;

/// default rolling window in bytes
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// largest window a config will accept (1 MiB)
pub const MAX_WINDOW_SIZE: usize = 1 << 20;

/// Number of entries in a byte-indexed table
pub const TABLE_LEN: usize = 256;

// types

/// Byte-indexed lookup table, used for both the base and the rolling table
pub type CrcTable = [u32; TABLE_LEN];

/// Which pair of artifacts a mismatch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// bitwise reference table vs doubling table
    Base,
    /// brute force rolling table vs doubling rolling table
    Rolling,
}

impl TableKind {
    /// short tag used in diagnostics
    pub fn tag(self) -> &'static str {
        match self {
            TableKind::Base => "c-crc",
            TableKind::Rolling => "fr-crc",
        }
    }
}

/// result type
pub type CrcResult<T> = Result<T, String>;
