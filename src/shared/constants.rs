/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROUTE CONSTANTS
// =============================================================================

/// Path prefix guarded by the admin gate
pub const ADMIN_PATH_PREFIX: &str = "/admin";

/// Route that unauthenticated admin requests are rewritten to
pub const UNAUTHORIZED_PATH: &str = "/api/auth";

/// Realm announced in `WWW-Authenticate`
pub const BASIC_AUTH_REALM: &str = "Secure Area";
