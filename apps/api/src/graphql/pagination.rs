//! Shared pagination utilities for GraphQL resolvers
//!
//! This module provides constants and helper functions for consistent
//! pagination across all query resolvers.

/// Maximum items per page for top-level list queries
pub const MAX_LIMIT: i32 = 100;

/// Maximum items for nested relationship resolvers
pub const MAX_NESTED_LIMIT: i32 = 50;

/// Default page size when a resolver receives no limit argument
pub const DEFAULT_LIMIT: i32 = 20;

/// Clamp pagination limit to valid range
#[inline]
pub fn clamp_limit(limit: Option<i32>, max: i32) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, max) as usize
}

/// Clamp offset to non-negative
#[inline]
pub fn clamp_offset(offset: Option<i32>) -> usize {
    offset.unwrap_or(0).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit_valid() {
        assert_eq!(clamp_limit(Some(50), 100), 50);
    }

    #[test]
    fn test_clamp_limit_too_high() {
        assert_eq!(clamp_limit(Some(200), 100), 100);
    }

    #[test]
    fn test_clamp_limit_too_low() {
        assert_eq!(clamp_limit(Some(0), 100), 1);
        assert_eq!(clamp_limit(Some(-5), 100), 1);
    }

    #[test]
    fn test_clamp_limit_default() {
        assert_eq!(clamp_limit(None, 100), DEFAULT_LIMIT as usize);
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(Some(10)), 10);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(None), 0);
    }
}
