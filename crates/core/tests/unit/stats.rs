//! Statistics Unit Tests.
//!
//! Verifies outcome accounting, derived rates and the summary line.

use csim_core::SimStats;
use csim_core::cache::policies::AccessOutcome;
use pretty_assertions::assert_eq;

#[test]
fn test_record_outcomes() {
    let mut stats = SimStats::default();
    stats.record(AccessOutcome::Miss);
    stats.record(AccessOutcome::Hit);
    stats.record(AccessOutcome::MissEvict { evicted_tag: 3 });
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 2,
            evictions: 1,
            ..SimStats::default()
        }
    );
    assert_eq!(stats.accesses(), 3);
}

#[test]
fn test_hit_rate() {
    let stats = SimStats {
        hits: 3,
        misses: 1,
        ..SimStats::default()
    };
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_hit_rate_of_empty_run_is_zero() {
    assert!(SimStats::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn test_summary_line() {
    let stats = SimStats {
        hits: 4,
        misses: 5,
        evictions: 3,
        instruction_fetches: 10,
        unknown_records: 1,
    };
    assert_eq!(stats.summary(), "hits:4 misses:5 evictions:3");
}
