//! Outcome types for best-effort cache operations
//!
//! Cache calls never return `Result`: a failed cache read is a miss and a
//! failed cache write is a no-op. Keeping these types apart from
//! `Result<_, DomainError>` means a cache failure cannot be bubbled into a
//! request with `?`.

/// Result of a best-effort cache read
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// A fresh entry was found and decoded
    Hit(T),
    /// No usable entry (absent, expired or undecodable)
    Miss,
    /// The backend failed; callers treat this exactly like a miss
    Degraded,
}

/// Result of a best-effort cache write, delete or invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWriteOutcome {
    /// The backend accepted the operation; `affected` counts removed or stored keys
    Applied { affected: usize },
    /// The backend failed; the failure has already been logged
    Degraded,
}

impl CacheWriteOutcome {
    pub fn affected(&self) -> usize {
        match self {
            Self::Applied { affected } => *affected,
            Self::Degraded => 0,
        }
    }

    /// Folds two outcomes; degraded wins, counts add up
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Applied { affected: a }, Self::Applied { affected: b }) => {
                Self::Applied { affected: a + b }
            }
            _ => Self::Degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outcome_and() {
        let a = CacheWriteOutcome::Applied { affected: 2 };
        let b = CacheWriteOutcome::Applied { affected: 1 };

        assert_eq!(a.and(b), CacheWriteOutcome::Applied { affected: 3 });
        assert_eq!(a.and(CacheWriteOutcome::Degraded), CacheWriteOutcome::Degraded);
        assert_eq!(CacheWriteOutcome::Degraded.affected(), 0);
    }
}
