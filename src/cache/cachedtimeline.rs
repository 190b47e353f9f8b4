// ── cached_timeline.rs ──────────────────────────────────────────────────────

use super::cachebackend::{
    CacheBackend,
    RefCellBackend
};
use crate::configuration::CacheConfiguration;
use crate::timeline::segment::{
    Segment,
    SegmentSpan
};
use crate::timeline::timeline::Timeline;
use crate::timeline::timelineerror::TimelineError;

/// Read-through lookup cache over a [`Timeline`].
///
/// 核心 struct 只寫一次,C 決定快取實作;快取只影響延遲,任何查詢的
/// 回傳值與無快取路徑完全一致。
pub struct CachedTimeline<C: CacheBackend = RefCellBackend> {
    timeline: Timeline,
    backend: C
}

impl<C: CacheBackend> CachedTimeline<C> {
    pub fn with_backend(timeline: Timeline, backend: C) -> Self {
        CachedTimeline { timeline, backend }
    }

    // ── delegate 方法 ───────────────────────────────────────────────────────

    pub fn serialize(&self) -> String {
        self.timeline.serialize()
    }

    pub fn segments(&self) -> &[Segment] {
        self.timeline.segments()
    }

    pub fn segment_containing(&self, at: f64) -> Result<Option<SegmentSpan>, TimelineError> {
        self.timeline.segment_containing(at)
    }

    // ── 變更路徑:成功後同步全量失效 ────────────────────────────────────────
    //
    // 驗證失敗的呼叫不會動到 timeline,也就不能動到快取。

    pub fn add(&mut self, from: f64, to: f64, amount: f64) -> Result<(), TimelineError> {
        self.timeline.add(from, to, amount)?;
        self.backend.invalidate_all();
        Ok(())
    }

    pub fn set(&mut self, from: f64, to: f64, amount: f64) -> Result<(), TimelineError> {
        self.timeline.set(from, to, amount)?;
        self.backend.invalidate_all();
        Ok(())
    }

    // ── 查詢路徑:miss 時計算並回填 ─────────────────────────────────────────

    pub fn value_at(&self, at: f64) -> Result<f64, TimelineError> {
        if let Some(cached) = self.backend.get(at) {
            return Ok(cached);
        }
        let value = self.timeline.value_at(at)?;
        self.backend.put(at, value);
        Ok(value)
    }
}

impl CachedTimeline<RefCellBackend> {
    pub fn new(configuration: CacheConfiguration) -> Self {
        Self::with_backend(Timeline::new(), RefCellBackend::new(configuration))
    }
}

impl Default for CachedTimeline<RefCellBackend> {
    fn default() -> Self {
        CachedTimeline::new(CacheConfiguration::default())
    }
}
