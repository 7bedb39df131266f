#![no_main]

use libfuzzer_sys::fuzz_target;
use nutriplan_read_plan::{normalize, parse_with_report};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Reading never fails and never panics
        let result = parse_with_report(s);

        // Macro values are ASCII digit runs
        for (key, value) in result.value.stats.iter() {
            assert!(
                !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
                "{key} has value {value:?}"
            );
        }

        // Normalizing normalized text changes nothing
        let once = normalize(s);
        let twice = normalize(&once.join("\n"));
        assert_eq!(once, twice, "normalize is not idempotent");
    }
});
