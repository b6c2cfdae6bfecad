//! Registration intake endpoint.
//!
//! ```text
//! POST /api/register {"name":"...","email":"...","ticketType":"standard"}
//! ```
//!
//! One request moves through the pipeline stages in a fixed order: rate
//! check, then field validation, then a single guarded insert. The first
//! failing stage terminates the request, so the store is never touched for
//! an over-quota or invalid submission, and the only observable side effect
//! is at most one durable insert on the success path.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::registration::{RegistrationDraft, RegistrationId, validate};
use crate::domain::Error;
use crate::inbound::http::client_key::ClientKey;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body.
///
/// Every field arrives as an optional raw string; requiredness and format
/// are validation rules so a single response can flag all failing fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Attendee name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email; the duplicate-detection key.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional contact number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional college name.
    #[serde(default)]
    pub college: Option<String>,
    /// Optional year of study (`1st Year`…`4th Year`, `Faculty`, `Other`).
    #[serde(default)]
    pub year: Option<String>,
    /// Optional department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Ticket tier: `standard`, `vip`, or `student`.
    #[serde(default)]
    pub ticket_type: Option<String>,
}

impl From<RegisterRequest> for RegistrationDraft {
    fn from(value: RegisterRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            college: value.college,
            year: value.year,
            department: value.department,
            ticket_type: value.ticket_type,
        }
    }
}

/// Successful registration response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Server-generated registration identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub registration_id: RegistrationId,
}

/// Accept a registration submission.
///
/// The raw body is parsed only after the rate check so an over-quota client
/// receives 429 even for a malformed payload.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration created", body = RegisterResponse),
        (status = 400, description = "Validation failure or malformed body", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 405, description = "Method not allowed", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Email already registered", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 429, description = "Rate limit exceeded", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Registration could not be stored", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["registration"],
    operation_id = "register"
)]
pub async fn register(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let client_key = ClientKey::from_request(&request);
    let decision = state.rate_limiter.check(client_key.as_str());
    if !decision.allowed {
        debug!(client = %client_key, reset_at = %decision.reset_at, "rejected over-quota submission");
        return Err(Error::RateLimited {
            remaining: decision.remaining,
            reset_at: decision.reset_at,
        });
    }

    let payload: RegisterRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!(client = %client_key, error = %err, "rejected malformed request body");
        Error::InvalidBody
    })?;

    let registration = validate(RegistrationDraft::from(payload)).map_err(|errors| {
        debug!(client = %client_key, fields = errors.len(), "rejected invalid submission");
        Error::Validation(errors)
    })?;

    let id = state.registrations.insert(&registration).await?;
    info!(registration_id = %id, "registration stored");
    Ok(HttpResponse::Created().json(RegisterResponse {
        registration_id: id,
    }))
}

/// Fixed 405 for every non-POST method on the registration route.
pub async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    use crate::domain::ports::{
        FixtureRegistrationStore, MockRegistrationStore, RegistrationStore, RegistrationStoreError,
    };
    use crate::domain::rate_limit::{RateLimiter, DEFAULT_LIMIT};

    use super::*;

    fn test_app(
        store: Arc<dyn RegistrationStore>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(store, Arc::new(RateLimiter::new()));
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::middleware::Trace)
            .service(
                web::scope("/api").service(
                    web::resource("/register")
                        .route(web::post().to(register))
                        .route(web::route().to(method_not_allowed)),
                ),
            )
    }

    fn fixture_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        test_app(Arc::new(FixtureRegistrationStore::default()))
    }

    fn valid_body(email: &str) -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": email,
            "ticketType": "standard"
        })
    }

    #[actix_web::test]
    async fn register_returns_the_generated_identifier() {
        let app = actix_test::init_service(fixture_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("ada@example.com"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        let id = body
            .get("registrationId")
            .and_then(Value::as_str)
            .expect("registrationId present");
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[actix_web::test]
    async fn second_submission_with_the_same_email_conflicts() {
        let app = actix_test::init_service(fixture_app()).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("ada@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        // Different name and phone, same email: still a duplicate.
        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(json!({
                    "name": "Augusta King",
                    "email": "ada@example.com",
                    "phone": "+44 20 7946 0000",
                    "ticketType": "vip"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("this email is already registered")
        );
        assert!(body.get("registrationId").is_none());
    }

    #[actix_web::test]
    async fn duplicate_detection_sees_through_email_formatting() {
        let app = actix_test::init_service(fixture_app()).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body(" USER@Example.com "))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("user@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn validation_failures_report_every_field_at_once() {
        let app = actix_test::init_service(fixture_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(json!({ "ticketType": "premium" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("validation failed")
        );
        let field_errors = body.get("fieldErrors").expect("fieldErrors present");
        assert!(field_errors.get("name").is_some());
        assert!(field_errors.get("email").is_some());
        assert!(field_errors.get("ticketType").is_some());
    }

    #[actix_web::test]
    async fn store_failures_return_a_generic_500() {
        let mut store = MockRegistrationStore::new();
        store
            .expect_insert()
            .returning(|_| Err(RegistrationStoreError::query("relation \"registrations\" does not exist")));
        let app = actix_test::init_service(test_app(Arc::new(store))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("ada@example.com"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("registration failed, please try again later")
        );
        assert!(body.get("fieldErrors").is_none());
        assert!(
            !serde_json::to_string(&body)
                .expect("body serializes")
                .contains("relation"),
            "internal cause must not leak"
        );
    }

    #[actix_web::test]
    async fn eleventh_request_in_a_window_is_rejected() {
        let app = actix_test::init_service(fixture_app()).await;

        for n in 0..DEFAULT_LIMIT {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/register")
                    .set_json(valid_body(&format!("attendee{n}@example.com")))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED, "request {n}");
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("late@example.com"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response
                .headers()
                .get("X-RateLimit-Remaining")
                .and_then(|v| v.to_str().ok()),
            Some("0")
        );
        assert!(response.headers().get("X-RateLimit-Reset").is_some());
        assert!(response.headers().get("Retry-After").is_some());
    }

    #[actix_web::test]
    async fn rate_check_runs_before_body_parsing() {
        let app = actix_test::init_service(fixture_app()).await;

        for n in 0..DEFAULT_LIMIT {
            let _admitted = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/register")
                    .set_json(valid_body(&format!("attendee{n}@example.com")))
                    .to_request(),
            )
            .await;
        }

        // Over quota, a garbage body must still yield 429, not 400.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_payload("not json")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn malformed_bodies_get_the_fixed_envelope() {
        let app = actix_test::init_service(fixture_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_payload("{not json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("request body must be valid JSON")
        );
    }

    #[actix_web::test]
    async fn non_post_methods_are_rejected_with_allow_header() {
        let app = actix_test::init_service(fixture_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/register").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("Allow").and_then(|v| v.to_str().ok()),
            Some("POST")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("method not allowed")
        );
    }

    #[actix_web::test]
    async fn responses_carry_a_trace_id() {
        let app = actix_test::init_service(fixture_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/register")
                .set_json(valid_body("ada@example.com"))
                .to_request(),
        )
        .await;

        assert!(response.headers().get("trace-id").is_some());
    }
}
