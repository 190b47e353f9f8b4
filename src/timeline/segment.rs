// ── segment.rs ──────────────────────────────────────────────────────────────

use serde::Serialize;
use serde::ser::{
    SerializeTuple,
    Serializer
};

// ── Segment ─────────────────────────────────────────────────────────────────

/// An ordered (point, value) pair: `value` holds from `point` until the next
/// breakpoint, or indefinitely if this is the last segment of the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    point: f64,
    value: f64
}

impl Segment {
    pub fn new(point: f64, value: f64) -> Segment {
        Segment { point, value }
    }

    pub fn point(&self) -> f64 {
        self.point
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// 序列化走 `[point, value]` 兩元素 array,對外契約是
/// `[[p0,v0],[p1,v1],...]` 的逐位元組精確形式。
impl Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&CompactNumber(self.point))?;
        tuple.serialize_element(&CompactNumber(self.value))?;
        tuple.end()
    }
}

// ── CompactNumber ───────────────────────────────────────────────────────────

/// 整數值必須輸出成 `10` 而非 `10.0`。fract() == 0 且落在 2^53 安全整數
/// 範圍內時改走 i64 路徑,其餘交給 serde_json 的最短可還原表示法。
struct CompactNumber(f64);

/// 2^53:在這之內的整數 f64 與 i64 互轉不失真。
const MAX_INTEGRAL: f64 = 9_007_199_254_740_992.0;

impl Serialize for CompactNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
        let x = self.0;
        if x.fract() == 0.0 && x.abs() <= MAX_INTEGRAL {
            serializer.serialize_i64(x as i64)
        } else {
            serializer.serialize_f64(x)
        }
    }
}

// ── SegmentSpan ─────────────────────────────────────────────────────────────

/// Half-open interval `[start, end)` covering a queried point, plus the value
/// held there. `end` is `None` when the last segment extends indefinitely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpan {
    start: f64,
    end: Option<f64>,
    value: f64
}

impl SegmentSpan {
    pub fn new(start: f64, end: Option<f64>, value: f64) -> SegmentSpan {
        SegmentSpan { start, end, value }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

// ── SegmentStore ────────────────────────────────────────────────────────────

/// Canonical ordered sequence of segments: points strictly increasing, no two
/// consecutive equal values, first value nonzero, at most one trailing zero.
///
/// 每次變更都是「整批換新」:舊序列被完整消費、新序列算完才取代,查詢端
/// 永遠只拿到不可變 view,不可能繞過不變量去改內容。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SegmentStore {
    segments: Vec<Segment>
}

impl SegmentStore {
    pub fn empty() -> SegmentStore {
        SegmentStore { segments: Vec::new() }
    }

    /// Normalizer 專用入口;caller 保證傳入的序列已是正準形式。
    pub(crate) fn from_canonical(segments: Vec<Segment>) -> SegmentStore {
        SegmentStore { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the last segment with `point <= x`, if any.
    fn locate(&self, x: f64) -> Option<usize> {
        // partition_point 回傳第一個 point > x 的索引
        let upper = self.segments.partition_point(|segment| segment.point <= x);
        if upper == 0 {
            None
        } else {
            Some(upper - 1)
        }
    }

    /// Value of the last segment whose point is `<= x`; 0 when `x` precedes
    /// every breakpoint or the store is empty. An exact breakpoint match
    /// returns that segment's own value, never the following one's.
    pub fn value_at(&self, x: f64) -> f64 {
        self.locate(x).map_or(0.0, |i| self.segments[i].value)
    }

    /// The segment covering `x`, as a half-open span. `None` when `x`
    /// precedes the first breakpoint, the store is empty, or `x` lies at or
    /// after a trailing zero breakpoint (the function is back on its implicit
    /// zero tail, so no recorded segment covers it).
    pub fn segment_containing(&self, x: f64) -> Option<SegmentSpan> {
        let i = self.locate(x)?;
        let segment = self.segments[i];
        match self.segments.get(i + 1) {
            Some(next) => Some(SegmentSpan::new(segment.point, Some(next.point), segment.value)),
            None => {
                if segment.value == 0.0 {
                    None
                } else {
                    Some(SegmentSpan::new(segment.point, None, segment.value))
                }
            }
        }
    }

    /// Canonical textual form `[[p0,v0],[p1,v1],...]`; empty store → `[]`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .expect("a canonical store of finite numbers always serializes")
    }
}
