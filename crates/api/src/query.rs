//! Shared query parameter types for API handlers.
//!
//! Resource-specific filters live next to their models in `workbound_db`;
//! list handlers extract them alongside [`PageParams`] as two separate
//! `Query` extractors.

use serde::Deserialize;
use workbound_core::filters::Page;

/// Page-number pagination parameters (`?page=&size=`).
///
/// `page` is 1-based. `size` defaults to 50 and is clamped to 500.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::from_params(self.page, self.size)
    }
}

/// Query parameters for the user list (`?email=`).
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
}

/// Query parameters for the role list (`?category_id=`).
#[derive(Debug, Default, Deserialize)]
pub struct RoleListParams {
    pub category_id: Option<workbound_core::types::DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_clamp_size() {
        let params = PageParams {
            page: Some(2),
            size: Some(10_000),
        };
        assert_eq!(params.page(), Page { limit: 500, offset: 500 });
        assert_eq!(PageParams::default().page(), Page::default());
    }
}
