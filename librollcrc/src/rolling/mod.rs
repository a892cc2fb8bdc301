//! rolling crc over a fixed size window
//!
//! O(1) per byte: fold the incoming byte, XOR out the outgoing one through
//! the rolling table
mod hasher;
mod table;

pub use hasher::{RollingContext, RollingCrc};
pub use table::{build_rolling_table_fast, build_rolling_table_slow};
