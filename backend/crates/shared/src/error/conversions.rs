//! RFC 7807 rendering for axum

#[cfg(feature = "axum")]
mod http {
    use axum::Json;
    use axum::http::{StatusCode, header};
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use crate::error::app_error::AppError;
    use crate::error::kind::ErrorKind;

    /// `application/problem+json` body.
    #[derive(Serialize)]
    struct Problem<'a> {
        #[serde(rename = "type")]
        type_uri: String,
        title: &'static str,
        status: u16,
        code: ErrorKind,
        detail: &'a str,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let problem = Problem {
                type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
                title: self.kind().as_str(),
                status: status.as_u16(),
                code: self.kind(),
                detail: self.message(),
            };

            let mut response = (status, Json(problem)).into_response();
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/problem+json"),
            );
            response
        }
    }

}
