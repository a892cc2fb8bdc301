use std::fmt::Write as _;

use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};

use crate::core::{CrcConfig, CrcResult, CrcTable, TABLE_LEN};
use crate::rolling::RollingContext;

/// Base and rolling table for one config, in a serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    pub polynomial: u32,
    pub window_size: usize,
    pub init: u32,
    pub crc_table: Vec<u32>,
    pub rolling_table: Vec<u32>,
}

impl TableSet {
    pub fn new(config: &CrcConfig) -> CrcResult<Self> {
        let ctx = RollingContext::new(config)?;
        Ok(TableSet {
            polynomial: config.polynomial(),
            window_size: config.window_size,
            init: config.init,
            crc_table: ctx.engine().table().to_vec(),
            rolling_table: ctx.rolling_table().to_vec(),
        })
    }

    pub fn config(&self) -> CrcConfig {
        CrcConfig::new(self.window_size).with_init(self.init)
    }

    /// Lengths are 256 and the tables match a fresh build of the same config
    pub fn validate(&self) -> CrcResult<()> {
        if self.crc_table.len() != TABLE_LEN || self.rolling_table.len() != TABLE_LEN {
            return Err(format!(
                "tables must have {} entries, got {} and {}",
                TABLE_LEN,
                self.crc_table.len(),
                self.rolling_table.len()
            ));
        }

        let config = self.config();
        if self.polynomial != config.polynomial() {
            return Err(format!("unsupported polynomial {:08x}", self.polynomial));
        }

        let fresh = TableSet::new(&config)?;
        if let Some(i) = first_difference(&self.crc_table, &fresh.crc_table) {
            return Err(format!("crc table entry {} does not match", i));
        }
        if let Some(i) = first_difference(&self.rolling_table, &fresh.rolling_table) {
            return Err(format!("rolling table entry {} does not match", i));
        }
        Ok(())
    }

    pub fn crc_table(&self) -> CrcResult<CrcTable> {
        to_array(&self.crc_table)
    }

    pub fn rolling_table(&self) -> CrcResult<CrcTable> {
        to_array(&self.rolling_table)
    }

    pub fn to_msgpack(&self) -> CrcResult<Vec<u8>> {
        to_vec_named(self).map_err(|e| format!("msgpack encode: {}", e))
    }

    /// Decode and validate
    pub fn from_msgpack(data: &[u8]) -> CrcResult<Self> {
        let set: TableSet = from_slice(data).map_err(|e| format!("msgpack decode: {}", e))?;
        set.validate()?;
        Ok(set)
    }

    pub fn to_json(&self) -> CrcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("json encode: {}", e))
    }

    /// Rust source with both tables as `const` arrays
    pub fn to_rust_source(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "// polynomial {:#010x}, window {} bytes, init {:#010x}",
            self.polynomial, self.window_size, self.init
        );
        write_array(&mut out, "CRC_TABLE", &self.crc_table);
        out.push('\n');
        write_array(&mut out, "ROLLING_CRC_TABLE", &self.rolling_table);
        out
    }
}

fn first_difference(a: &[u32], b: &[u32]) -> Option<usize> {
    a.iter().zip(b).position(|(x, y)| x != y)
}

fn to_array(entries: &[u32]) -> CrcResult<CrcTable> {
    CrcTable::try_from(entries)
        .map_err(|_| format!("expected {} entries, got {}", TABLE_LEN, entries.len()))
}

fn write_array(out: &mut String, name: &str, entries: &[u32]) {
    let _ = writeln!(out, "pub const {}: [u32; {}] = [", name, entries.len());
    for row in entries.chunks(8) {
        let line: Vec<String> = row.iter().map(|e| format!("0x{:08x},", e)).collect();
        let _ = writeln!(out, "    {}", line.join(" "));
    }
    out.push_str("];\n");
}
