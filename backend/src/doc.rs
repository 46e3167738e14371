//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the chair endpoints, the health probes, the error
//! schemas and the `chair_session` cookie security scheme. Swagger UI serves
//! it in debug builds.

use crate::domain::PrincipalKind;
use crate::inbound::http::chair::{
    ChairNotificationBody, ChairNotificationResponseBody, CoordinateBody,
    NotificationUserBody, RecordCoordinateResponseBody, UpdateChairActivityRequestBody,
    UpdateRideStatusRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the chair session cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ChairSession",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                PrincipalKind::Chair.session_cookie(),
                "Access token issued to the chair at registration.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Chair dispatch API",
        description = "Chair-facing ride lifecycle endpoints and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::chair::post_coordinate,
        crate::inbound::http::chair::post_ride_status,
        crate::inbound::http::chair::get_notification,
        crate::inbound::http::chair::post_activity,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CoordinateBody,
        RecordCoordinateResponseBody,
        UpdateRideStatusRequestBody,
        NotificationUserBody,
        ChairNotificationBody,
        ChairNotificationResponseBody,
        UpdateChairActivityRequestBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "chair", description = "Operations performed by chairs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
