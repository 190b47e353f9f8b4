// ── delta_compiler.rs ───────────────────────────────────────────────────────
//
// 把「對 [from, to) 套用操作 O」翻譯成一組 point deltas,完全不就地改動
// 既有 store。兩個操作都走同一條路:重導出既有序列的隱含 deltas,疊上
// 操作自身的貢獻,剩下的合併/歸零/排序全部交給 normalizer。

use super::deltamap::DeltaMap;
use super::segment::{
    Segment,
    SegmentStore
};

/// Compile `add(from, to, amount)`: the current store re-expressed as deltas,
/// plus `+amount` at `from` and `-amount` at `to`.
pub fn compile_add(store: &SegmentStore, from: f64, to: f64, amount: f64) -> DeltaMap {
    let mut deltas = DeltaMap::new();
    deltas.contribute_segments(store.segments());
    deltas.contribute(from, amount);
    deltas.contribute(to, -amount);
    deltas
}

/// Compile `set(from, to, amount)`: assemble a working sequence — the prefix
/// strictly below `from`, the override segment `(from, amount)`, the
/// carry-over reversion `(to, carry)`, the suffix strictly above `to` — and
/// re-derive its deltas. `carry` is the value the function held at `to`
/// before the override (0 if nothing was recorded there).
///
/// The reversion point is emitted unconditionally: a `set` whose upper bound
/// lies past every existing breakpoint drops back to 0 at `to` rather than
/// staying open-ended.
pub fn compile_set(store: &SegmentStore, from: f64, to: f64, amount: f64) -> DeltaMap {
    let carry = store.value_at(to);

    let mut working: Vec<Segment> = Vec::with_capacity(store.len() + 2);
    for segment in store.segments() {
        if segment.point() < from {
            working.push(*segment);
        }
    }
    working.push(Segment::new(from, amount));
    working.push(Segment::new(to, carry));
    for segment in store.segments() {
        if segment.point() > to {
            working.push(*segment);
        }
    }

    let mut deltas = DeltaMap::new();
    deltas.contribute_segments(&working);
    deltas
}
