//! Property tests for the frecency score: monotonic in visit count,
//! non-increasing with age, and never negative.

use proptest::prelude::*;

use activitystream::store::frecency_score;

const YEAR_SECS: i64 = 365 * 86_400;

proptest! {
    #[test]
    fn score_is_never_negative(count in any::<i32>(), age in any::<i64>()) {
        prop_assert!(frecency_score(count, age) >= 0.0);
    }

    #[test]
    fn more_visits_never_rank_lower(
        count in 0i32..10_000,
        extra in 1i32..1_000,
        age in 0i64..2 * YEAR_SECS,
    ) {
        prop_assert!(frecency_score(count + extra, age) > frecency_score(count, age));
    }

    #[test]
    fn older_visits_never_rank_higher(
        count in 1i32..10_000,
        age in 0i64..2 * YEAR_SECS,
        older_by in 0i64..YEAR_SECS,
    ) {
        prop_assert!(frecency_score(count, age + older_by) <= frecency_score(count, age));
    }

    #[test]
    fn negative_inputs_clamp_to_zero(count in i32::MIN..0, age in any::<i64>()) {
        prop_assert_eq!(frecency_score(count, age), 0.0);
    }
}

#[test]
fn test_bucket_boundaries() {
    const DAY: i64 = 86_400;
    assert_eq!(frecency_score(1, 0), 100.0);
    assert_eq!(frecency_score(1, 4 * DAY - 1), 100.0);
    assert_eq!(frecency_score(1, 4 * DAY), 70.0);
    assert_eq!(frecency_score(1, 14 * DAY), 50.0);
    assert_eq!(frecency_score(1, 31 * DAY), 30.0);
    assert_eq!(frecency_score(1, 90 * DAY), 10.0);
    // Visits recorded "in the future" count as current.
    assert_eq!(frecency_score(1, -50), 100.0);
}
