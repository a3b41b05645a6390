mod convert;
mod healthcheck;
pub mod response;

use salvo::Router;
use salvo::logging::Logger;

use crate::config::{ConfigHandler, Settings};

pub use calconv_core::constants::{
    BASE64_ROUTE_COMPONENT, BASE64_ROUTE_PREFIX, CONVERT_ROUTE_COMPONENT, CONVERT_ROUTE_PREFIX,
    HEALTHCHECK_ROUTE_COMPONENT,
};

/// ## Summary
/// Constructs the API router with the conversion and health check handlers.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(convert::routes())
}

/// ## Summary
/// Constructs the root router: request logging, settings injection and
/// [`routes`].
#[must_use]
pub fn app_router(settings: Settings) -> Router {
    Router::new()
        .hoop(Logger::new())
        .hoop(ConfigHandler::new(settings))
        .push(routes())
}
