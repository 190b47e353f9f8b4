// ── cache_backend.rs ────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::{
    HashMap,
    VecDeque
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc
};

use crate::configuration::CacheConfiguration;

/// 時間來源抽換點:正式碼用系統時鐘,測試注入手動時鐘,TTL 行為不用
/// sleep 就能驗證。
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 抽象快取行為:查詢 + 寫入 + 全量失效。
///
/// # Cache key 設計:`f64::to_bits`
///
/// 查詢點在公開邊界已驗證為有限值,位元相等即數值相等,直接拿位元表示
/// 當 `HashMap` key 就不需要替 f64 另造 `Eq`/`Hash`。唯一的分岔是
/// -0.0/+0.0 佔兩個 key,但兩者查出來的值相同,各自 miss 一次只是
/// 多算一遍,不是錯誤。
pub trait CacheBackend {
    fn get(&self, at: f64) -> Option<f64>;

    fn put(&self, at: f64, value: f64);

    fn invalidate_all(&self);
}

// ── 單執行緒版:RefCell ──────────────────────────────────────────────────────

struct CacheEntry {
    value: f64,
    inserted_at: DateTime<Utc>
}

struct CacheInner {
    entries: HashMap<u64, CacheEntry>,
    insertion_order: VecDeque<u64>
}

/// Bounded lookup cache: capacity-evicted in insertion order, entries expire
/// once their age exceeds the configured TTL.
///
/// 淘汰策略刻意採插入順序而非 LRU:額滿時丟最早插入的 entry,命中不
/// 改變順位。覆寫既有 key 只更新內容與時間戳,順位同樣不動。
pub struct RefCellBackend<K: Clock = SystemClock> {
    configuration: CacheConfiguration,
    clock: K,
    inner: RefCell<CacheInner>
}

impl RefCellBackend<SystemClock> {
    pub fn new(configuration: CacheConfiguration) -> Self {
        Self::with_clock(configuration, SystemClock)
    }
}

impl<K: Clock> RefCellBackend<K> {
    pub fn with_clock(configuration: CacheConfiguration, clock: K) -> Self {
        RefCellBackend {
            configuration,
            clock,
            inner: RefCell::new(CacheInner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new()
            })
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ttl(&self) -> TimeDelta {
        let millis = i64::try_from(self.configuration.ttl_millis().get()).unwrap_or(i64::MAX);
        TimeDelta::milliseconds(millis)
    }
}

impl<K: Clock> CacheBackend for RefCellBackend<K> {
    fn get(&self, at: f64) -> Option<f64> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(&at.to_bits())?;
        // 年齡「超過」ttl 才算過期;恰好等於仍視為新鮮
        if self.clock.now() - entry.inserted_at > self.ttl() {
            return None;
        }
        Some(entry.value)
    }

    fn put(&self, at: f64, value: f64) {
        let mut inner = self.inner.borrow_mut();
        let key = at.to_bits();
        let inserted_at = self.clock.now();

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.value = value;
            entry.inserted_at = inserted_at;
            return;
        }

        while inner.entries.len() >= self.configuration.max_entries().get() {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break
            }
        }

        inner.entries.insert(key, CacheEntry { value, inserted_at });
        inner.insertion_order.push_back(key);
    }

    fn invalidate_all(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.clear();
        inner.insertion_order.clear();
    }
}
