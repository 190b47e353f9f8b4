// ── delta_map.rs ────────────────────────────────────────────────────────────

use super::segment::Segment;

/// Ephemeral point → net delta accumulation, alive for exactly one mutation.
///
/// 同一個 point 往往收到多筆貢獻(既有段的重導出 + 操作本身的開/關),
/// 必須「相加」而非覆蓋。排序與去重延後到 `into_points()` 一次完成,
/// 中間只做 O(1) 的 push。
#[derive(Debug, Default)]
pub struct DeltaMap {
    contributions: Vec<(f64, f64)>
}

impl DeltaMap {
    pub fn new() -> DeltaMap {
        DeltaMap { contributions: Vec::new() }
    }

    pub fn contribute(&mut self, point: f64, delta: f64) {
        self.contributions.push((point, delta));
    }

    /// Re-express a step sequence as deltas: `+value` at each segment's point
    /// and, unless the segment is the last, `-value` at the next segment's
    /// point. Accumulating the result reproduces the sequence exactly, which
    /// is what lets one consolidation path serve every operation.
    pub fn contribute_segments(&mut self, segments: &[Segment]) {
        for (i, segment) in segments.iter().enumerate() {
            self.contribute(segment.point(), segment.value());
            if let Some(next) = segments.get(i + 1) {
                self.contribute(next.point(), -segment.value());
            }
        }
    }

    /// Drain into ascending (point, net delta) pairs with unique points.
    ///
    /// `total_cmp` 把 -0.0 排在 +0.0 正前方,接著用 `==` 合併相鄰相等的
    /// point,兩種零因此折疊成同一個 key。
    pub fn into_points(self) -> Vec<(f64, f64)> {
        let mut contributions = self.contributions;
        contributions.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));

        let mut points: Vec<(f64, f64)> = Vec::with_capacity(contributions.len());
        for (point, delta) in contributions {
            if let Some(last) = points.last_mut() {
                if last.0 == point {
                    last.1 += delta;
                    continue;
                }
            }
            points.push((point, delta));
        }
        points
    }
}
