pub mod config;
pub mod engine;
pub mod table;
pub mod types;

pub use config::CrcConfig;
pub use engine::{update, Crc32, Digest};
pub use table::{
    bit_step, build_fast_table, build_reference_table, doubling_build, find_doubling_violation,
    has_doubling_structure,
};
pub use types::*;
