mod verify_tests {
    use librollcrc::core::{build_reference_table, TableKind, CRC32_POLY};
    use librollcrc::verify::*;
    use librollcrc::{build_rolling_table_fast, Crc32, CrcConfig};

    #[test]
    fn test_self_test_default_passes() {
        let report = self_test(&CrcConfig::default(), DEFAULT_EXTRA_BYTES).unwrap();
        assert!(report.is_ok(), "{:?}", report.mismatches);
        assert_eq!(report.windows_checked, 201);
        assert_eq!(report.final_direct, report.final_rolled);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_self_test_zip_and_small_windows() {
        for window in [1, 2, 3, 7, 16, 64] {
            for config in [CrcConfig::new(window), CrcConfig::zip().with_window_size(window)] {
                let report = self_test(&config, 2 * window).unwrap();
                assert!(report.is_ok(), "window {}: {:?}", window, report.mismatches);
            }
        }
    }

    #[test]
    fn test_self_test_rejects_zero_window() {
        assert!(self_test(&CrcConfig::new(0), 10).is_err());
    }

    #[test]
    fn test_base_tables_agree() {
        assert!(verify_base_tables(CRC32_POLY).is_empty());
    }

    #[test]
    fn test_compare_tables_reports_entries() {
        let good = build_reference_table(CRC32_POLY);
        let mut bad = good;
        bad[3] ^= 0x10;
        bad[200] = 0;

        let mismatches = compare_tables(TableKind::Base, &good, &bad);
        assert_eq!(mismatches.len(), 2);
        assert_eq!(
            mismatches[0],
            Mismatch::Table {
                table: TableKind::Base,
                index: 3,
                expected: good[3],
                actual: good[3] ^ 0x10,
            }
        );
        assert!(mismatches[0].to_string().starts_with("c-crc: 03 "));
    }

    #[test]
    fn test_corrupted_rolling_table_detected() {
        let engine = Crc32::new(&CrcConfig::default());
        let mut rolling = build_rolling_table_fast(&engine, 20);
        let buffer = test_pattern(60);

        let (checked, mismatches) = verify_rolling_window(&engine, &rolling, 20, &buffer);
        assert_eq!(checked, 41);
        assert!(mismatches.is_empty());

        // the byte at index 5 leaves the window on the slide to offset 6
        rolling[buffer[5] as usize] ^= 1;
        let (_, mismatches) = verify_rolling_window(&engine, &rolling, 20, &buffer);
        assert!(!mismatches.is_empty());
        match &mismatches[0] {
            Mismatch::Window { offset, .. } => assert!(*offset <= 6),
            other => panic!("unexpected mismatch {:?}", other),
        }
    }

    #[test]
    fn test_wrong_window_rolling_table_detected() {
        // a table built for the wrong window never matches
        let engine = Crc32::new(&CrcConfig::default());
        let rolling = build_rolling_table_fast(&engine, 19);
        let buffer = test_pattern(60);
        let (_, mismatches) = verify_rolling_window(&engine, &rolling, 20, &buffer);
        assert!(!mismatches.is_empty());
    }

    #[test]
    fn test_short_buffer_checks_nothing() {
        let engine = Crc32::new(&CrcConfig::default());
        let rolling = build_rolling_table_fast(&engine, 20);
        let (checked, mismatches) = verify_rolling_window(&engine, &rolling, 20, &[1, 2, 3]);
        assert_eq!(checked, 0);
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_report_into_result_err() {
        let mut report = self_test(&CrcConfig::new(8), 8).unwrap();
        report.mismatches.push(Mismatch::Window {
            offset: 4,
            direct: 1,
            rolled: 2,
        });
        let err = report.into_result().unwrap_err();
        assert!(err.contains("1 mismatch(es)"));
        assert!(err.contains("ARE NOT EQUAL"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = self_test(&CrcConfig::new(4), 4).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["window_size"], 4);
        assert_eq!(json["polynomial"], 0xEDB88320u32);
        assert!(json["mismatches"].as_array().unwrap().is_empty());

        let m = Mismatch::Structure {
            table: TableKind::Rolling,
            index: 9,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["kind"], "structure");
        assert_eq!(json["table"], "rolling");
    }
}
