//! Rolling checksum tests
//!
//! Tests for:
//! - brute force vs doubling rolling table construction
//! - incremental window sliding vs direct checksums
//! - the RollingCrc hasher

use librollcrc::{
    build_rolling_table_fast, build_rolling_table_slow, has_doubling_structure, test_pattern,
    Crc32, CrcConfig, RollingContext,
};

#[test]
fn test_rolling_tables_agree_default_window() {
    let engine = Crc32::new(&CrcConfig::default());
    let slow = build_rolling_table_slow(&engine, 100);
    let fast = build_rolling_table_fast(&engine, 100);
    for c in 0..256 {
        assert_eq!(slow[c], fast[c], "entry {:02x}", c);
    }
}

#[test]
fn test_rolling_table_doubling_invariant() {
    let engine = Crc32::new(&CrcConfig::default());
    let table = build_rolling_table_fast(&engine, 100);

    let mut i = 1;
    while i < 256 {
        for j in 0..i {
            assert_eq!(table[i + j], table[i] ^ table[j]);
        }
        i *= 2;
    }
    assert!(has_doubling_structure(&table));
}

#[test]
fn test_rolling_entry_definition() {
    // entry c is "c then W zeros" xor "W zeros", from the same start
    let engine = Crc32::zip();
    let window = 9;
    let table = build_rolling_table_slow(&engine, window);

    let mut with_byte = vec![0xA7u8];
    with_byte.extend(std::iter::repeat(0).take(window));
    let zeros = vec![0u8; window];

    let x = engine.update_slice(engine.init(), &with_byte);
    let y = engine.update_slice(engine.init(), &zeros);
    assert_eq!(table[0xA7], x ^ y);
}

#[test]
fn test_rolling_window_scenario() {
    // 300 byte pattern, window 100: checksum of the tail both ways
    let config = CrcConfig::new(100);
    let engine = Crc32::new(&config);
    let rolling = build_rolling_table_fast(&engine, 100);
    let buffer = test_pattern(300);
    assert_eq!(buffer[0], 11);
    assert_eq!(buffer[17], ((11 + 31 * 17 + 1) % 256) as u8);

    let direct = engine.checksum(&buffer[200..300]);

    let mut state = engine.finish(engine.checksum(&buffer[0..100]));
    for i in 0..200 {
        state = engine.update(state, buffer[100 + i]) ^ rolling[buffer[i] as usize];
    }
    assert_eq!(engine.finish(state), direct);
}

#[test]
fn test_rolling_every_offset_both_inits() {
    for config in [CrcConfig::new(100), CrcConfig::zip()] {
        let ctx = RollingContext::new(&config).unwrap();
        let engine = ctx.engine();
        let buffer = test_pattern(300);

        let mut state = engine.update_slice(engine.init(), &buffer[..100]);
        for k in 0..=200 {
            if k > 0 {
                state = ctx.roll(state, buffer[k - 1], buffer[k + 99]);
            }
            assert_eq!(
                engine.finish(state),
                engine.checksum(&buffer[k..k + 100]),
                "offset {} init {:08x}",
                k,
                config.init
            );
        }
    }
}

#[test]
fn test_zip_windows_are_standard_crc32() {
    let ctx = RollingContext::new(&CrcConfig::zip().with_window_size(9)).unwrap();
    let data = b"xx123456789yy";
    let sums = ctx.window_checksums(data);
    assert_eq!(sums[2], 0xCBF43926);
}

#[test]
fn test_hasher_over_text() {
    let ctx = RollingContext::new(&CrcConfig::new(3)).unwrap();
    let mut roll = ctx.hasher();
    let bytes = b"hello world";

    for (i, &b) in bytes.iter().enumerate() {
        let crc = roll.push(b);
        if i < 2 {
            assert!(crc.is_none());
        } else {
            assert_eq!(crc, Some(ctx.crc(&bytes[i - 2..=i])));
        }
    }
}

#[test]
fn test_two_hashers_share_context() {
    let ctx = RollingContext::new(&CrcConfig::zip().with_window_size(16)).unwrap();
    let data = test_pattern(64);

    let mut a = ctx.hasher();
    let mut b = ctx.hasher();
    a.extend(&data);
    b.extend(&data[40..]);
    assert_eq!(a.value(), b.value());
    assert_eq!(a.value(), Some(ctx.crc(&data[48..])));
}
