use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use anyhow::anyhow;
use serde_json::json;

pub mod routes;

/// An error that renders as the JSON body the API promises: client errors
/// carry their message in `error`, internal faults hide the detail behind a
/// generic `error` with the cause in `message`.
#[derive(Debug)]
pub struct WebError {
    status: StatusCode,
    err: anyhow::Error,
}

impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError {
            status: StatusCode::BAD_REQUEST,
            err: anyhow!(message.into()),
        }
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let body = if self.status.is_client_error() {
            json!({ "error": self.to_string() })
        } else {
            json!({ "error": "Internal server error", "message": self.to_string() })
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> WebError {
        WebError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            err,
        }
    }
}

impl From<actix_multipart::MultipartError> for WebError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        WebError {
            status: StatusCode::BAD_REQUEST,
            err: anyhow!("invalid multipart payload: {err}"),
        }
    }
}
