//! Pagination utilities for list endpoints.
//!
//! Two strategies are accepted on the query string:
//!
//! - **Offset-based**: `limit` and `offset`
//! - **Page-based**: `limit` and `page` (1-indexed); `page` wins over `offset`
//!
//! Out-of-range values are rejected by the validation schema before they get
//! here, so the accessors below only fill in defaults.
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 100, "limit": 10, "offset": 20, "has_more": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::validation::{FieldRule, RequestSchema, Schema, ValidationRules};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const MAX_OFFSET: i64 = 1_000_000;
pub const MAX_PAGE: i64 = MAX_OFFSET / MAX_LIMIT + 1;

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Maximum items per page (the limit that was applied)
    pub limit: i64,
    /// Number of items skipped (only present for offset-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page number (only present for page-based requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        let page = params.page();

        Self {
            total,
            limit,
            offset: page.is_none().then_some(offset),
            page,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default)]
    pub limit: Option<i64>,
    /// Number of items to skip (0-1000000, default: 0, ignored if `page` is set)
    #[serde(default)]
    pub offset: Option<i64>,
    /// Page number (1-indexed, at most 10001)
    #[serde(default)]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page() {
            (page - 1).saturating_mul(self.limit())
        } else {
            self.offset.unwrap_or(0).clamp(0, MAX_OFFSET)
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.clamp(1, MAX_PAGE))
    }
}

impl RequestSchema for PaginationParams {
    fn schema(_rules: &ValidationRules) -> Schema {
        Schema::new()
            .field(FieldRule::integer("limit").min(1).max(MAX_LIMIT))
            .field(FieldRule::integer("offset").min(0).max(MAX_OFFSET))
            .field(FieldRule::integer("page").min(1).max(MAX_PAGE))
    }
}
