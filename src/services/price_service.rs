use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::models::PricePoint;

/// Width of the quantization grid used to pick the current price
pub const BUCKET_MINUTES: i64 = 5;

/// Truncate `time` down to the start of its `minutes`-wide UTC bucket,
/// seconds and sub-seconds zeroed
pub fn floor_to_bucket(time: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    // duration_trunc only fails for zero/negative widths or out-of-range timestamps
    time.duration_trunc(Duration::minutes(minutes)).unwrap_or(time)
}

/// `time` truncated to the 5-minute grid, e.g. 14:07:32 -> 14:05:00
pub fn floor5(time: DateTime<Utc>) -> DateTime<Utc> {
    floor_to_bucket(time, BUCKET_MINUTES)
}

/// Pick the point that represents the current price at `now`.
///
/// The most recent point at or before `floor5(now)` wins; ties keep batch order.
/// When no point is that old yet, the first point of the batch is used.
/// Returns `None` only for an empty batch.
pub fn select_current_price(points: &[PricePoint], now: DateTime<Utc>) -> Option<&PricePoint> {
    let target = floor5(now);

    let mut candidates: Vec<(DateTime<Utc>, &PricePoint)> = points
        .iter()
        .filter_map(|p| p.instant.map(|instant| (instant, p)))
        .filter(|(instant, _)| *instant <= target)
        .collect();

    // stable sort, equal instants stay in feed order
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates
        .first()
        .map(|(_, p)| *p)
        .or_else(|| points.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
    }

    #[test]
    fn test_floor5_truncates() {
        assert_eq!(floor5(at(14, 7, 32)), at(14, 5, 0));
        assert_eq!(floor5(at(14, 5, 0)), at(14, 5, 0));
        assert_eq!(floor5(at(14, 4, 59)), at(14, 0, 0));
        assert_eq!(floor5(at(23, 59, 59)), at(23, 55, 0));

        let with_nanos = at(14, 9, 59) + Duration::milliseconds(999);
        assert_eq!(floor5(with_nanos), at(14, 5, 0));
    }

    #[test]
    fn test_floor5_idempotent_and_monotonic() {
        let mut previous = floor5(at(0, 0, 0));
        for step in 0..180 {
            let t = at(12, 0, 0) + Duration::seconds(step * 37);
            let f = floor5(t);
            assert_eq!(floor5(f), f);
            assert!(f <= t);
            assert!(f >= previous);
            previous = f;
        }
    }

    fn batch() -> Vec<PricePoint> {
        vec![
            PricePoint::new("2025-06-02T14:00:00+00:00", 100.0),
            PricePoint::new("2025-06-02T14:05:00+00:00", 110.0),
        ]
    }

    #[test]
    fn test_selects_latest_at_or_before_bucket() {
        let points = batch();
        assert_eq!(select_current_price(&points, at(14, 7, 30)).unwrap().mid, 110.0);
        assert_eq!(select_current_price(&points, at(14, 2, 0)).unwrap().mid, 100.0);
    }

    #[test]
    fn test_point_inside_current_bucket_is_ignored() {
        // 14:06 is after floor5(14:08) = 14:05
        let points = vec![
            PricePoint::new("2025-06-02T14:00:00+00:00", 100.0),
            PricePoint::new("2025-06-02T14:06:00+00:00", 130.0),
        ];
        assert_eq!(select_current_price(&points, at(14, 8, 0)).unwrap().mid, 100.0);
    }

    #[test]
    fn test_falls_back_to_first_point() {
        let points = vec![PricePoint::new("2025-06-02T14:10:00+00:00", 120.0)];
        assert_eq!(select_current_price(&points, at(14, 3, 0)).unwrap().mid, 120.0);
    }

    #[test]
    fn test_fallback_uses_batch_order_not_time() {
        let points = vec![
            PricePoint::new("2025-06-02T15:00:00+00:00", 2.0),
            PricePoint::new("2025-06-02T14:30:00+00:00", 1.0),
            PricePoint::new("garbage", 3.0),
        ];
        assert_eq!(select_current_price(&points, at(14, 3, 0)).unwrap().mid, 2.0);
    }

    #[test]
    fn test_unsorted_batch_picks_maximum_candidate() {
        let points = vec![
            PricePoint::new("2025-06-02T13:50:00+00:00", 1.0),
            PricePoint::new("2025-06-02T14:05:00+00:00", 3.0),
            PricePoint::new("2025-06-02T14:00:00+00:00", 2.0),
            PricePoint::new("2025-06-02T14:20:00+00:00", 4.0),
        ];
        assert_eq!(select_current_price(&points, at(14, 12, 0)).unwrap().mid, 3.0);
    }

    #[test]
    fn test_offsets_are_compared_as_instants() {
        let points = vec![
            PricePoint::new("2025-06-02T14:00:00+00:00", 1.0),
            // 14:05 UTC
            PricePoint::new("2025-06-02T16:05:00+02:00", 2.0),
        ];
        assert_eq!(select_current_price(&points, at(14, 5, 0)).unwrap().mid, 2.0);
    }

    #[test]
    fn test_equal_instants_keep_feed_order() {
        let points = vec![
            PricePoint::new("2025-06-02T14:00:00+00:00", 1.0),
            PricePoint::new("2025-06-02T14:00:00Z", 2.0),
        ];
        assert_eq!(select_current_price(&points, at(14, 1, 0)).unwrap().mid, 1.0);
    }

    #[test]
    fn test_empty_batch_has_no_selection() {
        assert!(select_current_price(&[], at(14, 0, 0)).is_none());
    }

    #[test]
    fn test_selection_is_member_of_batch() {
        let points = batch();
        for minute in 0..30 {
            let selected = select_current_price(&points, at(13, 50, 0) + Duration::minutes(minute)).unwrap();
            assert!(points.contains(selected));
        }
    }
}
