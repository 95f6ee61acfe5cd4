use std::hash::Hash;

use serde::Serialize;
use serde_json::Value as Json;
use tokio_postgres::types::{FromSqlOwned, ToSql};

use crate::validate::{validate_domain, validate_ip, validate_port};

/// 규칙 종류 기술자. IP/URL/포트 저장소와 핸들러가 이 트레이트 하나로
/// 제네릭하게 동작한다 (종류별 중복 코드 제거).
pub trait RuleKind: Send + Sync + 'static {
    /// 저장되는 값 타입 (ip/url은 문자열, 포트는 정수)
    type Value: ToSql
        + FromSqlOwned
        + Serialize
        + Clone
        + std::fmt::Debug
        + PartialEq
        + Eq
        + Hash
        + Send
        + Sync
        + 'static;

    /// 테이블 이름
    const TABLE: &'static str;
    /// 응답 `type` 필드에 쓰이는 라벨
    const LABEL: &'static str;
    /// 값 검증 실패 메시지
    const INVALID_MESSAGE: &'static str;
    /// values 누락/빈 배열 메시지
    const EMPTY_MESSAGE: &'static str;
    /// 삭제 사전검사 실패 메시지
    const NOT_FOUND_MESSAGE: &'static str;

    /// JSON 원소에서 값 추출 (타입 불일치는 None)
    fn parse_value(raw: &Json) -> Option<Self::Value>;

    /// 값 형식 검증
    fn is_valid(value: &Self::Value) -> bool;
}

/// IPv4 주소 규칙
#[derive(Debug)]
pub struct IpRules;

impl RuleKind for IpRules {
    type Value = String;

    const TABLE: &'static str = "ip_rules";
    const LABEL: &'static str = "ip";
    const INVALID_MESSAGE: &'static str = "Invalid IP";
    const EMPTY_MESSAGE: &'static str = "'values' must be a non-empty array of IPs";
    const NOT_FOUND_MESSAGE: &'static str =
        "One or more IP addresses not found in the database";

    fn parse_value(raw: &Json) -> Option<String> {
        // IP는 대소문자 정규화 없음
        raw.as_str().map(str::to_string)
    }

    fn is_valid(value: &String) -> bool {
        validate_ip(value)
    }
}

/// 도메인(URL) 규칙
#[derive(Debug)]
pub struct UrlRules;

impl RuleKind for UrlRules {
    type Value = String;

    const TABLE: &'static str = "url_rules";
    const LABEL: &'static str = "url";
    const INVALID_MESSAGE: &'static str = "Invalid URL";
    const EMPTY_MESSAGE: &'static str = "'values' must be a non-empty array of URLs";
    const NOT_FOUND_MESSAGE: &'static str = "One or more URLs not found in the database";

    fn parse_value(raw: &Json) -> Option<String> {
        // 도메인은 대소문자 구분이 없으므로 소문자로 정규화
        raw.as_str().map(|s| s.to_ascii_lowercase())
    }

    fn is_valid(value: &String) -> bool {
        validate_domain(value)
    }
}

/// 포트 규칙
#[derive(Debug)]
pub struct PortRules;

impl RuleKind for PortRules {
    type Value = i32;

    const TABLE: &'static str = "port_rules";
    const LABEL: &'static str = "port";
    const INVALID_MESSAGE: &'static str = "Invalid Port";
    const EMPTY_MESSAGE: &'static str = "'values' must be a non-empty array of Ports";
    const NOT_FOUND_MESSAGE: &'static str = "One or more ports not found in the database";

    fn parse_value(raw: &Json) -> Option<i32> {
        // 숫자 문자열("80")은 받지 않는다. JSON 정수만 허용
        raw.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn is_valid(value: &i32) -> bool {
        validate_port(i64::from(*value))
    }
}
