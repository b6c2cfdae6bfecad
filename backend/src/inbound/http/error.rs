//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain failure vocabulary HTTP-agnostic while giving every
//! rejection path one fixed envelope: `{ error, fieldErrors?, traceId? }`.
//! Rate-limit rejections additionally carry quota headers, and 405 carries
//! `Allow`. Nothing assembled here ever includes an internal cause.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::Utc;
use serde::Serialize;

use crate::domain::registration::FieldErrors;
use crate::domain::Error;
use crate::middleware::trace::{TraceId, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Header reporting admissions left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";
/// Header reporting the window reset instant as epoch seconds.
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<&'a FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) | Error::InvalidBody => StatusCode::BAD_REQUEST,
        Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Error::AlreadyRegistered => StatusCode::CONFLICT,
        Error::Store => StatusCode::INTERNAL_SERVER_ERROR,
        Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        match self {
            Error::RateLimited { remaining, reset_at } => {
                let retry_after = (*reset_at - Utc::now()).num_seconds().max(0);
                builder.insert_header((RATE_LIMIT_REMAINING_HEADER, remaining.to_string()));
                builder.insert_header((RATE_LIMIT_RESET_HEADER, reset_at.timestamp().to_string()));
                builder.insert_header((actix_web::http::header::RETRY_AFTER, retry_after.to_string()));
            }
            Error::MethodNotAllowed => {
                builder.insert_header((actix_web::http::header::ALLOW, "POST"));
            }
            _ => {}
        }

        let field_errors = match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        };

        builder.json(ErrorBody {
            error: self.to_string(),
            field_errors,
            trace_id,
        })
    }
}
