use wasm_bindgen::prelude::*;

pub mod core;
pub mod export;
pub mod rolling;
pub mod verify;

pub use crate::core::{
    bit_step, build_fast_table, build_reference_table, doubling_build, has_doubling_structure,
    Crc32, CrcConfig, CrcResult, CrcTable, Digest, CRC32_POLY, DEFAULT_WINDOW_SIZE, INIT_ONES,
    INIT_ZERO,
};
pub use export::TableSet;
pub use rolling::{build_rolling_table_fast, build_rolling_table_slow, RollingContext, RollingCrc};
pub use verify::{self_test, test_pattern, Mismatch, VerifyReport, DEFAULT_EXTRA_BYTES};

// result helpers

/// turn an error into js
fn to_js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

// api functions

/// Route rust panics to the browser console
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// standard CRC-32 (zip, png, ethernet)
#[wasm_bindgen]
pub fn crc32(data: &[u8]) -> u32 {
    Crc32::zip().checksum(data)
}

/// CRC-32 with an explicit initial value
///
/// # Arguments
/// * `data` - bytes to checksum
/// * `init` - initial state, also XORed into the result (0 or 0xFFFFFFFF)
#[wasm_bindgen]
pub fn checksum(data: &[u8], init: u32) -> u32 {
    Crc32::new(&CrcConfig::default().with_init(init)).checksum(data)
}

/// checksum of every full window
///
/// # Arguments
/// * `data` - input bytes
/// * `window_size` - window length in bytes
/// * `init` - initial state (0 or 0xFFFFFFFF)
///
/// # Returns
/// one checksum per window position, empty if `data` is shorter than a window
#[wasm_bindgen]
pub fn window_checksums(data: &[u8], window_size: usize, init: u32) -> Result<Vec<u32>, JsValue> {
    let config = CrcConfig::new(window_size).with_init(init);
    let ctx = RollingContext::new(&config).map_err(to_js_err)?;
    Ok(ctx.window_checksums(data))
}

/// run the table and rolling cross checks, returns the report object
#[wasm_bindgen]
pub fn run_self_test(window_size: usize, init: u32) -> Result<JsValue, JsValue> {
    let config = CrcConfig::new(window_size).with_init(init);
    let report = self_test(&config, DEFAULT_EXTRA_BYTES).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}
