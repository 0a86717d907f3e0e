//! Role type levels.
//!
//! Must match the seed data in `20260301000005_create_roles.sql`.

/// Lowest role type level that may change or delete any work item in its
/// category. The seeded "Manager" role type sits exactly here.
pub const MANAGER_LEVEL: f64 = 9.0;
