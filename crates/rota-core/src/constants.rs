/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const ROSTER_ROUTE_COMPONENT: &str = "v1";
pub const ROSTER_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ROSTER_ROUTE_COMPONENT);

pub const ADMIN_ROUTE_COMPONENT: &str = "admin";
pub const ADMIN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ADMIN_ROUTE_COMPONENT);

pub const SHIFTS_ROUTE: &str = const_str::concat!(ROSTER_ROUTE_PREFIX, "/shifts");
pub const SHIFT_TEMPLATES_ROUTE: &str = const_str::concat!(ROSTER_ROUTE_PREFIX, "/shift-templates");
pub const LOCATIONS_ROUTE: &str = const_str::concat!(ROSTER_ROUTE_PREFIX, "/locations");
pub const MEMBERS_ROUTE: &str = const_str::concat!(ROSTER_ROUTE_PREFIX, "/organization/members");

pub const SESSIONS_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/sessions");
pub const ERROR_LOGS_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/error-logs");
pub const FEATURE_FLAGS_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/feature-flags");
pub const BROADCASTS_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/broadcasts");
pub const PLANS_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/plans");
pub const BILLING_ROUTE: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/billing");

/// Sentinel staff key for shifts without an assignee
pub const UNASSIGNED_STAFF_KEY: &str = "unassigned";
