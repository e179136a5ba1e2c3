//! Session pool size.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Requested size class for a ranking session.
///
/// Bounded sessions complete once every pair has been compared; the
/// unbounded class (wire value 0) has no built-in completion criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSize {
    Ten,
    Fifty,
    Hundred,
    Unbounded,
}

impl PoolSize {
    /// Parses the wire representation: 10, 50, 100, or 0 for unbounded.
    ///
    /// # Errors
    ///
    /// - `InvalidPool` for any other value
    pub fn from_wire(value: u32) -> Result<Self, DomainError> {
        match value {
            0 => Ok(PoolSize::Unbounded),
            10 => Ok(PoolSize::Ten),
            50 => Ok(PoolSize::Fifty),
            100 => Ok(PoolSize::Hundred),
            other => Err(DomainError::new(
                ErrorCode::InvalidPool,
                format!("ranking size must be 0, 10, 50, or 100, got {}", other),
            )),
        }
    }

    /// The wire representation (0 for unbounded).
    pub fn wire(&self) -> u32 {
        match self {
            PoolSize::Ten => 10,
            PoolSize::Fifty => 50,
            PoolSize::Hundred => 100,
            PoolSize::Unbounded => 0,
        }
    }

    /// Item count for bounded classes, `None` for unbounded.
    pub fn bound(&self) -> Option<usize> {
        match self {
            PoolSize::Ten => Some(10),
            PoolSize::Fifty => Some(50),
            PoolSize::Hundred => Some(100),
            PoolSize::Unbounded => None,
        }
    }

    /// Whether sessions of this size finish by pair exhaustion.
    pub fn is_bounded(&self) -> bool {
        self.bound().is_some()
    }
}
