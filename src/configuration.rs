use std::fs::File;
use std::io::BufReader;
use std::num::{
    NonZeroU64,
    NonZeroUsize
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonParse(#[from] serde_json::Error)
}

const DEFAULT_MAX_ENTRIES: NonZeroUsize = NonZeroUsize::new(1000).unwrap();
const DEFAULT_TTL_MILLIS: NonZeroU64 = NonZeroU64::new(5000).unwrap();

fn default_max_entries() -> NonZeroUsize {
    DEFAULT_MAX_ENTRIES
}

fn default_ttl_millis() -> NonZeroU64 {
    DEFAULT_TTL_MILLIS
}

/// Lookup-cache tuning, loadable from a JSON object like
/// `{"maxEntries": 500, "ttlMillis": 2000}`. Missing fields take the
/// defaults (1000 entries, 5000 ms).
///
/// 「必須 > 0」由 NonZero 型別承擔:0 在反序列化時就被拒絕,之後的程式
/// 不需要再寫 runtime 檢查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfiguration {
    #[serde(default = "default_max_entries")]
    max_entries: NonZeroUsize,

    #[serde(default = "default_ttl_millis")]
    ttl_millis: NonZeroU64
}

impl CacheConfiguration {
    pub fn new(max_entries: NonZeroUsize, ttl_millis: NonZeroU64) -> CacheConfiguration {
        CacheConfiguration { max_entries, ttl_millis }
    }

    pub fn max_entries(&self) -> NonZeroUsize {
        self.max_entries
    }

    pub fn ttl_millis(&self) -> NonZeroU64 {
        self.ttl_millis
    }

    pub fn from_reader(file_path: &str) -> Result<CacheConfiguration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }
}

impl Default for CacheConfiguration {
    fn default() -> CacheConfiguration {
        CacheConfiguration {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl_millis: DEFAULT_TTL_MILLIS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_takes_all_defaults() {
        let configuration: CacheConfiguration = serde_json::from_str("{}").unwrap();
        assert_eq!(configuration, CacheConfiguration::default());
        assert_eq!(configuration.max_entries().get(), 1000);
        assert_eq!(configuration.ttl_millis().get(), 5000);
    }

    #[test]
    fn fields_use_camel_case_keys() {
        let configuration: CacheConfiguration =
            serde_json::from_str(r#"{"maxEntries": 3, "ttlMillis": 250}"#).unwrap();
        assert_eq!(configuration.max_entries().get(), 3);
        assert_eq!(configuration.ttl_millis().get(), 250);
    }

    #[test]
    fn partial_object_keeps_the_other_default() {
        let configuration: CacheConfiguration =
            serde_json::from_str(r#"{"maxEntries": 3}"#).unwrap();
        assert_eq!(configuration.max_entries().get(), 3);
        assert_eq!(configuration.ttl_millis().get(), 5000);
    }

    #[test]
    fn zero_is_rejected_at_deserialization() {
        assert!(serde_json::from_str::<CacheConfiguration>(r#"{"maxEntries": 0}"#).is_err());
        assert!(serde_json::from_str::<CacheConfiguration>(r#"{"ttlMillis": 0}"#).is_err());
    }
}
