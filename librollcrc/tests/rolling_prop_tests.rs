use librollcrc::{CrcConfig, RollingContext};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rolling_matches_direct(
        zip in any::<bool>(),
        data in prop::collection::vec(any::<u8>(), 1..512usize),
        window in 1usize..64usize,
    ) {
        prop_assume!(window <= data.len());
        let config = if zip { CrcConfig::zip() } else { CrcConfig::default() };
        let ctx = RollingContext::new(&config.with_window_size(window)).unwrap();

        let sums = ctx.window_checksums(&data);
        prop_assert_eq!(sums.len(), data.len() - window + 1);
        for (k, sum) in sums.iter().enumerate() {
            prop_assert_eq!(*sum, ctx.crc(&data[k..k + window]));
        }

        let mut hasher = ctx.hasher();
        prop_assert_eq!(hasher.extend(&data), sums.last().copied());
    }

    #[test]
    fn rolling_table_is_linear(window in 1usize..200usize, a in any::<u8>(), b in any::<u8>()) {
        let ctx = RollingContext::new(&CrcConfig::new(window)).unwrap();
        let table = ctx.rolling_table();
        prop_assert_eq!(table[(a ^ b) as usize], table[a as usize] ^ table[b as usize]);
    }
}
