use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

use fwadmin_error::FwError;

/// 클라이언트에 내보내는 내부 에러 메시지 (상세는 서버 로그에만 남긴다)
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// JSON 응답
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(payload)))
        .unwrap()
}

/// 단일 메시지 에러 응답
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &json!({ "error": message }))
}

/// 에러 -> HTTP 응답 변환. 검증/비즈니스 에러는 400, 나머지는 전부
/// 불투명한 500으로 내려간다.
pub fn error_to_response(err: &FwError) -> Response<Full<Bytes>> {
    match err {
        FwError::Validation(errors) => {
            json_response(StatusCode::BAD_REQUEST, &json!({ "errors": errors }))
        }
        FwError::BadRequest(msg) | FwError::NotFound(msg) => {
            error_response(StatusCode::BAD_REQUEST, msg)
        }
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwadmin_error::FieldError;
    use http_body_util::BodyExt;

    async fn body_json(res: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_render_as_field_list() {
        let err = FwError::Validation(vec![FieldError::new("values.0", "Invalid IP")]);
        let res = error_to_response(&err);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["errors"][0]["path"], "values.0");
        assert_eq!(json["errors"][0]["message"], "Invalid IP");
    }

    #[tokio::test]
    async fn not_found_is_a_plain_400_message() {
        let err = FwError::NotFound("One or more ports not found in the database".to_string());
        let res = error_to_response(&err);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["error"], "One or more ports not found in the database");
    }

    #[tokio::test]
    async fn other_errors_are_opaque_500s() {
        let err = FwError::Database("duplicate key value".to_string());
        let res = error_to_response(&err);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(res).await;
        assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
    }
}
