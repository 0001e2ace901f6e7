//! This modules defines the common functionality for paging data.

use serde::Deserialize;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of items to return when the request does not specify a limit.
    pub default_limit: u64,
    /// The largest limit a client may ask for. Larger limits are clamped.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 1000,
        }
    }
}

/// The `limit` and `skip` query parameters as sent by the client.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// The maximum number of items to return.
    pub limit: Option<u64>,
    /// The number of items to skip before the first returned item.
    pub skip: Option<u64>,
}

/// A resolved page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The maximum number of items to return.
    pub limit: u64,
    /// The number of items to skip.
    pub skip: u64,
}

impl PaginationConfig {
    /// Fill in defaults for `params` and clamp the limit to [PaginationConfig::max_limit].
    pub fn resolve(&self, params: &PageParams) -> Page {
        Page {
            limit: params
                .limit
                .unwrap_or(self.default_limit)
                .min(self.max_limit),
            skip: params.skip.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod pagination_tests {
    use super::{Page, PageParams, PaginationConfig};

    #[test]
    fn uses_defaults_when_not_specified() {
        let config = PaginationConfig::default();

        let page = config.resolve(&PageParams::default());

        assert_eq!(page, Page { limit: 50, skip: 0 });
    }

    #[test]
    fn clamps_limit() {
        let config = PaginationConfig::default();

        let page = config.resolve(&PageParams {
            limit: Some(5000),
            skip: Some(20),
        });

        assert_eq!(
            page,
            Page {
                limit: 1000,
                skip: 20
            }
        );
    }
}
