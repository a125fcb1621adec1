/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - manages admin accounts on top of regular admin duties
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Admin role - triages and processes complaints, publishes news
pub const ROLE_ADMIN: &str = "admin";

/// User role - files complaints, likes and comments
pub const ROLE_USER: &str = "user";
