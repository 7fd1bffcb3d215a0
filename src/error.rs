use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a scheduling or directory operation can fail with. The first
/// three variants are caller mistakes and map to 4xx responses; `Parse` and
/// `Io` are server-side storage failures and map to 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing input, rejected before any state is touched.
    #[error("{0}")]
    Validation(String),

    /// The candidate interval overlaps an existing entry in the same room
    /// and day.
    #[error("{0}")]
    Conflict(String),

    /// The addressed room, slot or doctor does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A persisted collection file did not parse as JSON.
    #[error("corrupt collection file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The underlying read or write failed.
    #[error("storage failure: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Conflict(_) => "conflict",
            Error::NotFound(_) => "not_found",
            Error::Parse(_) => "parse",
            Error::Io(_) => "io",
        }
    }

    pub fn missing_field(name: &str) -> Self {
        Error::Validation(format!("missing required field `{name}`"))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Parse(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Storage details stay in the log; the response body only admits
        // that something went wrong server-side.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{self}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody {
            error: self.kind(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Conflict("taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(Error::Validation("x".into()).kind(), "validation");
        assert_eq!(Error::Conflict("x".into()).kind(), "conflict");
        assert_eq!(Error::NotFound("x".into()).kind(), "not_found");
    }

    #[test]
    fn test_missing_field_message() {
        let err = Error::missing_field("fromTime");
        assert_eq!(err.to_string(), "missing required field `fromTime`");
    }
}
