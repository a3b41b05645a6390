/// Route component constants shared across crates
pub const CONVERT_ROUTE_COMPONENT: &str = "convert";
pub const CONVERT_ROUTE_PREFIX: &str = const_str::concat!("/", CONVERT_ROUTE_COMPONENT);

pub const BASE64_ROUTE_COMPONENT: &str = "base64";
pub const BASE64_ROUTE_PREFIX: &str =
    const_str::concat!(CONVERT_ROUTE_PREFIX, "/", BASE64_ROUTE_COMPONENT);

pub const HEALTHCHECK_ROUTE_COMPONENT: &str = "healthcheck";

/// Media type accepted by the upload route.
pub const CALENDAR_MEDIA_TYPE: &str = "text/calendar";

/// Multipart field carrying the uploaded calendar.
pub const UPLOAD_FIELD: &str = "file";

/// Deepest BEGIN/END nesting accepted by the parser.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Properties whose values are comma-separated lists (RFC 5545 §3.8).
///
/// Anything not listed here is kept as one opaque string, even if it
/// contains commas.
pub const DEFAULT_MULTI_VALUED_PROPERTIES: &[&str] =
    &["CATEGORIES", "RESOURCES", "EXDATE", "RDATE", "FREEBUSY"];
