//! Cache time-to-live classes

use std::time::Duration;

use serde::Deserialize;

/// TTL class of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTtl {
    /// Property list queries
    Short,
    /// Property detail and favourites pages
    Medium,
    /// Reserved; no call site uses it yet
    Long,
}

/// Concrete durations for each TTL class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheTtlPolicy {
    pub short_secs: u64,
    pub medium_secs: u64,
    pub long_secs: u64,
}

impl CacheTtlPolicy {
    pub const DEFAULT_SHORT_SECS: u64 = 300;
    pub const DEFAULT_MEDIUM_SECS: u64 = 3600;
    pub const DEFAULT_LONG_SECS: u64 = 86_400;

    pub fn duration(&self, ttl: CacheTtl) -> Duration {
        let secs = match ttl {
            CacheTtl::Short => self.short_secs,
            CacheTtl::Medium => self.medium_secs,
            CacheTtl::Long => self.long_secs,
        };

        Duration::from_secs(secs.max(1))
    }

    /// Longest TTL any entry can receive
    pub fn ceiling(&self) -> Duration {
        [CacheTtl::Short, CacheTtl::Medium, CacheTtl::Long]
            .into_iter()
            .map(|class| self.duration(class))
            .max()
            .unwrap_or(Duration::from_secs(Self::DEFAULT_LONG_SECS))
    }
}

impl Default for CacheTtlPolicy {
    fn default() -> Self {
        Self {
            short_secs: Self::DEFAULT_SHORT_SECS,
            medium_secs: Self::DEFAULT_MEDIUM_SECS,
            long_secs: Self::DEFAULT_LONG_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let policy = CacheTtlPolicy::default();

        assert_eq!(policy.duration(CacheTtl::Short), Duration::from_secs(300));
        assert_eq!(policy.duration(CacheTtl::Medium), Duration::from_secs(3600));
        assert_eq!(policy.duration(CacheTtl::Long), Duration::from_secs(86_400));
        assert_eq!(policy.ceiling(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_zero_is_clamped_to_one_second() {
        let policy = CacheTtlPolicy {
            short_secs: 0,
            ..Default::default()
        };

        assert_eq!(policy.duration(CacheTtl::Short), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let policy: CacheTtlPolicy = serde_json::from_str(r#"{"short_secs": 60}"#).unwrap();

        assert_eq!(policy.short_secs, 60);
        assert_eq!(policy.medium_secs, CacheTtlPolicy::DEFAULT_MEDIUM_SECS);
    }
}
