use std::error::Error as StdError;
use std::fmt;
use std::io;

use deadpool_postgres::PoolError;
use serde::Serialize;
use serde_yml::Error as YmlError;
use tokio_postgres::Error as PgError;

/// 필드 단위 검증 에러 (필드 경로 + 메시지)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// fwadmin 서버의 모든 에러 타입을 정의합니다.
#[derive(Debug)]
pub enum FwError {
    /// 설정 관련 에러
    Config(String),

    /// 네트워크 입출력 에러
    Io(io::Error),

    /// 데이터베이스 관련 에러
    Database(String),

    /// 요청 본문 검증 에러 (필드 경로 목록)
    Validation(Vec<FieldError>),

    /// 잘못된 요청 (mode 오류 등 단일 메시지 400)
    BadRequest(String),

    /// 삭제/토글 대상 미존재 (비즈니스 400)
    NotFound(String),

    /// HTTP 프로토콜 관련 에러
    Http(String),

    /// 기타 에러
    Other(String),
}

impl fmt::Display for FwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FwError::Config(msg) => write!(f, "설정 에러: {}", msg),
            FwError::Io(err) => write!(f, "I/O 에러: {}", err),
            FwError::Database(msg) => write!(f, "데이터베이스 에러: {}", msg),
            FwError::Validation(errors) => {
                write!(f, "검증 에러: {}개 필드", errors.len())
            }
            FwError::BadRequest(msg) => write!(f, "잘못된 요청: {}", msg),
            FwError::NotFound(msg) => write!(f, "대상 없음: {}", msg),
            FwError::Http(msg) => write!(f, "HTTP 에러: {}", msg),
            FwError::Other(msg) => write!(f, "기타 에러: {}", msg),
        }
    }
}

impl StdError for FwError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FwError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Result 타입 별칭 정의
pub type Result<T> = std::result::Result<T, FwError>;

/// From 트레이트 구현으로 다양한 에러 타입을 FwError로 변환
impl From<io::Error> for FwError {
    fn from(err: io::Error) -> Self {
        FwError::Io(err)
    }
}

impl From<PoolError> for FwError {
    fn from(err: PoolError) -> Self {
        FwError::Database(format!("DB 풀 에러: {}", err))
    }
}

impl From<PgError> for FwError {
    fn from(err: PgError) -> Self {
        FwError::Database(format!("PostgreSQL 에러: {}", err))
    }
}

impl From<YmlError> for FwError {
    fn from(err: YmlError) -> Self {
        FwError::Config(format!("YAML 파싱 에러: {}", err))
    }
}

impl From<serde_json::Error> for FwError {
    fn from(err: serde_json::Error) -> Self {
        FwError::BadRequest(format!("JSON 파싱 에러: {}", err))
    }
}

impl From<String> for FwError {
    fn from(err: String) -> Self {
        FwError::Other(err)
    }
}

impl From<&str> for FwError {
    fn from(err: &str) -> Self {
        FwError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_serializes_path_and_message() {
        let err = FieldError::new("values.0", "Invalid IP");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["path"], "values.0");
        assert_eq!(json["message"], "Invalid IP");
    }

    #[test]
    fn str_converts_to_other_variant() {
        let err: FwError = "boom".into();
        assert!(matches!(err, FwError::Other(_)));
    }
}
