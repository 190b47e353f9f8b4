use thiserror::Error;

/// Validation failures for the public timeline operations.
///
/// 所有檢查都在任何變更發生之前完成:被拒絕的呼叫不會留下部分套用的狀態。
/// 非數值引數在這個邊界上無法表達(簽名就是 `f64`),所以執行期只剩
/// range 類的檢查需要處理。
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimelineError {
    /// Range operations require `from < to`; an empty or inverted range has
    /// no half-open interval to apply to.
    #[error("invalid range: `from` ({from}) must be strictly less than `to` ({to})")]
    InvalidRange { from: f64, to: f64 },

    /// Breakpoints and amounts must be finite; NaN and ±∞ have no ordering
    /// on the axis.
    #[error("invalid range: `{argument}` must be finite, got {value}")]
    NonFiniteArgument {
        argument: &'static str,
        value: f64,
    },
}
