// ── normalizer.rs ───────────────────────────────────────────────────────────

use super::deltamap::DeltaMap;
use super::segment::{
    Segment,
    SegmentStore
};

/// Accumulate a delta map into the canonical minimal store.
///
/// Running sum over the points in ascending order; a point is emitted as a
/// segment only when the cumulative value differs from the last emitted value
/// (an empty output counts as value 0). 這一條發射規則同時守住三個不變量:
/// 前導零被跳過、相鄰重複值被合併、尾端零串只留下第一個。
///
/// 等值判斷是精確的 IEEE-754 相等,不帶 epsilon:加法抵銷必須剛好歸零
/// 才會觸發消段。
pub fn normalize(deltas: DeltaMap) -> SegmentStore {
    let mut segments: Vec<Segment> = Vec::new();
    let mut cumulative = 0.0;

    for (point, delta) in deltas.into_points() {
        cumulative += delta;
        let emitted = segments.last().map_or(0.0, |segment| segment.value());
        if cumulative != emitted {
            segments.push(Segment::new(point, cumulative));
        }
    }

    SegmentStore::from_canonical(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(contributions: &[(f64, f64)]) -> SegmentStore {
        let mut deltas = DeltaMap::new();
        for &(point, delta) in contributions {
            deltas.contribute(point, delta);
        }
        normalize(deltas)
    }

    fn store(pairs: &[(f64, f64)]) -> SegmentStore {
        SegmentStore::from_canonical(
            pairs.iter().map(|&(p, v)| Segment::new(p, v)).collect()
        )
    }

    #[test]
    fn empty_map_normalizes_to_empty_store() {
        assert_eq!(normalized(&[]), SegmentStore::empty());
    }

    #[test]
    fn leading_zero_points_are_skipped() {
        // 10 上淨 delta 為 0,完全抵銷的 breakpoint 不該留下來
        assert_eq!(
            normalized(&[(10.0, 1.0), (10.0, -1.0), (20.0, 2.0), (30.0, -2.0)]),
            store(&[(20.0, 2.0), (30.0, 0.0)])
        );
    }

    #[test]
    fn adjacent_equal_values_are_merged() {
        // (10,1) 與 (20,1):20 是多餘的 breakpoint
        assert_eq!(
            normalized(&[(10.0, 1.0), (20.0, 0.0), (30.0, -1.0)]),
            store(&[(10.0, 1.0), (30.0, 0.0)])
        );
    }

    #[test]
    fn trailing_zero_run_collapses_to_its_first_member() {
        assert_eq!(
            normalized(&[(10.0, 1.0), (30.0, -1.0), (40.0, 0.0), (50.0, 0.0)]),
            store(&[(10.0, 1.0), (30.0, 0.0)])
        );
    }

    #[test]
    fn interior_return_to_zero_markers_survive() {
        assert_eq!(
            normalized(&[(10.0, -1.0), (20.0, 1.0), (30.0, -1.0), (40.0, 1.0)]),
            store(&[(10.0, -1.0), (20.0, 0.0), (30.0, -1.0), (40.0, 0.0)])
        );
    }

    #[test]
    fn nonzero_tail_is_kept_open() {
        assert_eq!(
            normalized(&[(10.0, 1.0), (20.0, 2.0)]),
            store(&[(10.0, 1.0), (20.0, 3.0)])
        );
    }

    #[test]
    fn zero_elimination_needs_exact_cancellation() {
        // 0.1 + 0.2 - 0.3 != 0 (浮點),segment 必須留著
        let result = normalized(&[(10.0, 0.1), (10.0, 0.2), (10.0, -0.3)]);
        assert_eq!(result.len(), 1);
        assert!(result.value_at(10.0) != 0.0);
    }
}
