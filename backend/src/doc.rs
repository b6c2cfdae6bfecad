//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregate used by Swagger UI in debug builds. The
//! registration endpoint and health probes are registered here together with
//! the wire-level schema wrappers from the inbound layer.

use crate::inbound::http::schemas::ErrorSchema;
use utoipa::OpenApi;

/// OpenAPI document for the registration API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Podium registration API",
        description = "Public registration intake for the Podium conference."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::register::register,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::inbound::http::register::RegisterRequest,
        crate::inbound::http::register::RegisterResponse,
        ErrorSchema,
    )),
    tags(
        (name = "registration", description = "Public registration intake"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
