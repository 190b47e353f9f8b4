// ── timeline.rs ─────────────────────────────────────────────────────────────

use super::deltacompiler::{
    compile_add,
    compile_set
};
use super::normalizer::normalize;
use super::segment::{
    Segment,
    SegmentSpan,
    SegmentStore
};
use super::timelineerror::TimelineError;

fn check_finite(argument: &'static str, value: f64) -> Result<(), TimelineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TimelineError::NonFiniteArgument { argument, value })
    }
}

fn check_range(from: f64, to: f64, amount: f64) -> Result<(), TimelineError> {
    check_finite("from", from)?;
    check_finite("to", to)?;
    check_finite("amount", amount)?;
    if from < to {
        Ok(())
    } else {
        Err(TimelineError::InvalidRange { from, to })
    }
}

/// A piecewise-constant function over a one-dimensional axis, kept as the
/// minimal ordered list of (breakpoint, value) pairs.
///
/// 兩個變更操作(`add` 疊加、`set` 覆寫)都編譯成 point deltas 再重新
/// 正規化,舊序列被整批換掉,呼叫端看不到任何中間狀態。單執行緒、
/// 同步、無內部鎖;要嵌進並發宿主就由宿主自己對單一實例串行化。
pub struct Timeline {
    store: SegmentStore
}

impl Timeline {
    /// Starts empty: the function is 0 everywhere.
    pub fn new() -> Timeline {
        Timeline { store: SegmentStore::empty() }
    }

    /// Apply `+amount` over the half-open range `[from, to)`.
    pub fn add(&mut self, from: f64, to: f64, amount: f64) -> Result<(), TimelineError> {
        check_range(from, to, amount)?;
        let deltas = compile_add(&self.store, from, to, amount);
        self.store = normalize(deltas);
        Ok(())
    }

    /// Override `[from, to)` with `amount`, restoring the prior value at `to`.
    pub fn set(&mut self, from: f64, to: f64, amount: f64) -> Result<(), TimelineError> {
        check_range(from, to, amount)?;
        let deltas = compile_set(&self.store, from, to, amount);
        self.store = normalize(deltas);
        Ok(())
    }

    /// The function's value at `at`; 0 before the first breakpoint.
    pub fn value_at(&self, at: f64) -> Result<f64, TimelineError> {
        check_finite("at", at)?;
        Ok(self.store.value_at(at))
    }

    /// The half-open segment covering `at`, or `None` where no recorded
    /// segment applies (before the first breakpoint, or on the implicit zero
    /// tail).
    pub fn segment_containing(&self, at: f64) -> Result<Option<SegmentSpan>, TimelineError> {
        check_finite("at", at)?;
        Ok(self.store.segment_containing(at))
    }

    /// Canonical textual form `[[p0,v0],[p1,v1],...]`; empty timeline → `[]`.
    pub fn serialize(&self) -> String {
        self.store.to_json()
    }

    /// Immutable view of the canonical segment sequence.
    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }
}

impl Default for Timeline {
    fn default() -> Timeline {
        Timeline::new()
    }
}
