//! Trace Runner Unit Tests.
//!
//! Replays small inline traces end to end and checks the counters, the
//! verbose annotations and how problem records are handled.

use csim_core::config::SimConfig;
use csim_core::{SimError, SimStats, TraceRunner, simulate};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{config, counts, replay, verbose_config};

/// Classic seven-record trace exercising conflicts in set 1.
const YI_TRACE: &str = " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n";

// ══════════════════════════════════════════════════════════
// 1. Counter Scenarios
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::one_line_thrash((0, 1, 0), " L 10,1\n L 20,1\n L 10,1\n", (0, 3, 2))]
#[case::modify_hits_on_store((0, 1, 0), " M 10,1\n", (1, 1, 0))]
#[case::store_after_load((4, 1, 4), " L 10,1\n S 10,1\n", (1, 1, 0))]
#[case::same_block_offsets((4, 1, 4), " L 10,1\n L 1f,1\n L 18,4\n", (2, 1, 0))]
#[case::yi_direct_mapped((4, 1, 4), YI_TRACE, (4, 5, 3))]
#[case::yi_two_way((4, 2, 4), YI_TRACE, (4, 5, 2))]
#[case::yi_fully_associative((0, 4, 4), YI_TRACE, (5, 4, 0))]
#[case::lru_order((0, 2, 0), " L 0,1\n L 1,1\n L 0,1\n L 2,1\n L 1,1\n", (1, 4, 2))]
fn test_counter_scenarios(
    #[case] geometry: (u32, usize, u32),
    #[case] trace: &str,
    #[case] expected: (u64, u64, u64),
) {
    let (s, e, b) = geometry;
    assert_eq!(counts(&config(s, e, b), trace), expected);
}

#[test]
fn test_empty_trace() {
    let (stats, out) = replay(&verbose_config(4, 1, 4), "").unwrap();
    assert_eq!(stats, SimStats::default());
    assert_eq!(out, "");
}

// ══════════════════════════════════════════════════════════
// 2. Skipped Records
// ══════════════════════════════════════════════════════════

#[test]
fn test_instruction_fetches_never_touch_cache() {
    let trace = "I 0400d7d4,8\n L 10,1\nI 00000010,8\n L 10,1\n";
    let (stats, out) = replay(&verbose_config(4, 1, 4), trace).unwrap();
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 1,
            evictions: 0,
            instruction_fetches: 2,
            unknown_records: 0,
        }
    );
    assert_eq!(out, " L 10,1 miss\n L 10,1 hit\n");
}

#[test]
fn test_blank_lines_are_ignored() {
    assert_eq!(
        counts(&config(4, 1, 4), "\n L 10,1\n\n   \n L 10,1\n"),
        (1, 1, 0)
    );
}

#[test]
fn test_unknown_type_is_counted_and_skipped() {
    let trace = " L 10,1\n X 10,1\n L 10,1\n";
    let (stats, out) = replay(&verbose_config(4, 1, 4), trace).unwrap();
    assert_eq!((stats.hits, stats.misses), (1, 1));
    assert_eq!(stats.unknown_records, 1);
    assert_eq!(out, " L 10,1 miss\n X 10,1 error\n L 10,1 hit\n");
}

#[test]
fn test_malformed_address_aborts_with_line_number() {
    let trace = "I 0,1\n L 10,1\n L zz,1\n L 10,1\n";
    let err = replay(&config(4, 1, 4), trace).unwrap_err();
    match err {
        SimError::MalformedAddress { line, text } => {
            assert_eq!(line, 3);
            assert_eq!(text, " L zz,1");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

/// The size field is never used, so an unreadable one does not stop the run.
#[test]
fn test_unreadable_size_still_counted() {
    let trace = " L 10,4294967296\n L 10,1a\n M 20,\n";
    assert_eq!(counts(&config(0, 1, 0), trace), (2, 2, 1));
}

/// A line that is not valid UTF-8 is classified like any other line.
#[test]
fn test_invalid_utf8_line_is_skipped_as_unknown() {
    let trace: &[u8] = b" L 10,1\n\xff\xfe\n L 10,1\n";
    let stats = simulate(&config(4, 1, 4), trace, std::io::sink()).unwrap();
    assert_eq!((stats.hits, stats.misses, stats.evictions), (1, 1, 0));
    assert_eq!(stats.unknown_records, 1);
}

/// `run` accepts a borrowed reader, leaving it with the caller.
#[test]
fn test_run_with_borrowed_reader() {
    let mut reader: &[u8] = b" L 10,1\n L 10,1\n";
    let mut runner = TraceRunner::new(&config(4, 1, 4)).unwrap();
    let stats = runner.run(&mut reader, std::io::sink()).unwrap();
    assert_eq!((stats.hits, stats.misses), (1, 1));
    assert!(reader.is_empty());
}

#[test]
fn test_invalid_geometry_rejected_before_replay() {
    let err = replay(&config(4, 0, 4), " L 10,1\n").unwrap_err();
    assert!(matches!(err, SimError::InvalidGeometry(_)));
}

// ══════════════════════════════════════════════════════════
// 3. Verbose Output
// ══════════════════════════════════════════════════════════

#[test]
fn test_verbose_yi_trace() {
    let (_, out) = replay(&verbose_config(4, 1, 4), YI_TRACE).unwrap();
    let expected = concat!(
        " L 10,1 miss\n",
        " M 20,1 miss hit\n",
        " L 22,1 hit\n",
        " S 18,1 hit\n",
        " L 110,1 miss eviction\n",
        " L 210,1 miss eviction\n",
        " M 12,1 miss eviction hit\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn test_quiet_run_prints_nothing() {
    let (_, out) = replay(&config(4, 1, 4), YI_TRACE).unwrap();
    assert_eq!(out, "");
}

// ══════════════════════════════════════════════════════════
// 4. Runner State
// ══════════════════════════════════════════════════════════

#[test]
fn test_step_by_step_matches_run() {
    let config = config(4, 1, 4);
    let mut runner = TraceRunner::new(&config).unwrap();
    let mut sink = std::io::sink();
    for line in YI_TRACE.lines() {
        runner.step(line, &mut sink).unwrap();
    }
    let whole = simulate(&config, YI_TRACE.as_bytes(), std::io::sink()).unwrap();
    assert_eq!(*runner.stats(), whole);
    assert_eq!(runner.cache().occupancy(1), 1);
}

#[test]
fn test_fixed_address_width_aliases_high_tags() {
    let inferred = config(0, 2, 4);
    let fixed = SimConfig {
        address_bits: Some(8),
        ..inferred.clone()
    };
    // 0x010 and 0x110 differ only in bit 8.
    let trace = " L 010,1\n L 110,1\n";
    assert_eq!(counts(&fixed, trace), (1, 1, 0));
    assert_eq!(counts(&inferred, trace), (0, 2, 0));
}
