use serde_json::Value as Json;

use fwadmin_error::{FieldError, FwError, Result};

use crate::kind::RuleKind;
use crate::mode::Mode;

/// mode 오류 메시지 (단일 메시지 400으로 반환)
pub const MODE_MESSAGE: &str = "'mode' must be a blacklist or whitelist";

/// 토글 요청 mode 오류 메시지
const UPDATE_MODE_MESSAGE: &str = "mode must be 'blacklist/whitelist";

/// 요청 본문에서 mode 추출. 스키마 검증보다 먼저 수행되어
/// 자체 에러 형태로 단락된다.
pub fn parse_mode(body: &Json) -> Result<Mode> {
    body.get("mode")
        .and_then(Json::as_str)
        .and_then(Mode::parse)
        .ok_or_else(|| FwError::BadRequest(MODE_MESSAGE.to_string()))
}

/// 배치 추가/삭제 요청 본문 (mode + values)
#[derive(Debug)]
pub struct RuleListInput<K: RuleKind> {
    pub mode: Mode,
    pub values: Vec<K::Value>,
}

impl<K: RuleKind> RuleListInput<K> {
    /// 본문 파싱 + 종류별 값 검증. 실패한 필드 경로 목록을 모아 반환한다.
    pub fn parse(body: &Json) -> Result<Self> {
        let mode = parse_mode(body)?;

        let Some(raw) = body.get("values").and_then(Json::as_array) else {
            return Err(FwError::Validation(vec![FieldError::new(
                "values",
                K::EMPTY_MESSAGE,
            )]));
        };
        if raw.is_empty() {
            return Err(FwError::Validation(vec![FieldError::new(
                "values",
                K::EMPTY_MESSAGE,
            )]));
        }

        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(raw.len());
        for (i, item) in raw.iter().enumerate() {
            match K::parse_value(item) {
                Some(value) if K::is_valid(&value) => values.push(value),
                _ => errors.push(FieldError::new(
                    format!("values.{i}"),
                    K::INVALID_MESSAGE,
                )),
            }
        }

        if errors.is_empty() {
            Ok(Self { mode, values })
        } else {
            Err(FwError::Validation(errors))
        }
    }
}

/// 종류 하나에 대한 토글 지시 (id 목록 + mode + active)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListInput {
    pub ids: Vec<i32>,
    pub mode: Mode,
    pub active: bool,
}

impl Default for UpdateListInput {
    /// 생략된 종류의 기본값. 빈 id 목록은 저장소에서 보장된 no-op이다.
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            mode: Mode::Blacklist,
            active: false,
        }
    }
}

/// PATCH /rules 요청 본문 (종류별 지시는 모두 선택 사항)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAllInput {
    pub urls: UpdateListInput,
    pub ports: UpdateListInput,
    pub ips: UpdateListInput,
}

impl UpdateAllInput {
    pub fn parse(body: &Json) -> Result<Self> {
        if !body.is_object() {
            return Err(FwError::BadRequest(
                "request body must be a JSON object".to_string(),
            ));
        }

        let mut errors = Vec::new();
        let urls = parse_update_section(body, "urls", &mut errors);
        let ports = parse_update_section(body, "ports", &mut errors);
        let ips = parse_update_section(body, "ips", &mut errors);

        if errors.is_empty() {
            Ok(Self { urls, ports, ips })
        } else {
            Err(FwError::Validation(errors))
        }
    }
}

/// 종류 하나의 토글 지시 파싱. 키가 없으면 기본값(no-op).
fn parse_update_section(
    body: &Json,
    key: &str,
    errors: &mut Vec<FieldError>,
) -> UpdateListInput {
    let Some(section) = body.get(key) else {
        return UpdateListInput::default();
    };
    if section.is_null() {
        return UpdateListInput::default();
    }

    let Some(section) = section.as_object() else {
        errors.push(FieldError::new(key, "must be an object"));
        return UpdateListInput::default();
    };

    let mut ids = Vec::new();
    match section.get("ids").and_then(Json::as_array) {
        Some(raw_ids) => {
            for (i, raw) in raw_ids.iter().enumerate() {
                match raw.as_i64().and_then(|v| i32::try_from(v).ok()) {
                    Some(id) if id > 0 => ids.push(id),
                    _ => errors.push(FieldError::new(
                        format!("{key}.ids.{i}"),
                        "id must be a positive integer",
                    )),
                }
            }
        }
        None => {
            errors.push(FieldError::new(
                format!("{key}.ids"),
                "'ids' must be an array of positive integers",
            ));
        }
    }

    let mode = match section.get("mode").and_then(Json::as_str).and_then(Mode::parse) {
        Some(mode) => mode,
        None => {
            errors.push(FieldError::new(format!("{key}.mode"), UPDATE_MODE_MESSAGE));
            Mode::Blacklist
        }
    };

    let active = match section.get("active").and_then(Json::as_bool) {
        Some(active) => active,
        None => {
            errors.push(FieldError::new(
                format!("{key}.active"),
                "'active' must be a boolean",
            ));
            false
        }
    };

    UpdateListInput { ids, mode, active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{IpRules, PortRules, UrlRules};
    use serde_json::json;

    fn field_paths(err: FwError) -> Vec<String> {
        match err {
            FwError::Validation(errors) => errors.into_iter().map(|e| e.path).collect(),
            other => panic!("검증 에러가 아님: {other}"),
        }
    }

    #[test]
    fn parses_valid_ip_batch_with_mixed_case_mode() {
        let body = json!({"mode": "BlackList", "values": ["1.1.1.1", "2.2.2.2"]});
        let input = RuleListInput::<IpRules>::parse(&body).unwrap();
        assert_eq!(input.mode, Mode::Blacklist);
        assert_eq!(input.values, vec!["1.1.1.1", "2.2.2.2"]);
    }

    #[test]
    fn missing_mode_short_circuits_before_values() {
        let body = json!({"values": ["not an ip"]});
        match RuleListInput::<IpRules>::parse(&body) {
            Err(FwError::BadRequest(msg)) => assert_eq!(msg, MODE_MESSAGE),
            other => panic!("예상 밖 결과: {other:?}"),
        }
    }

    #[test]
    fn empty_or_missing_values_is_a_field_error() {
        for body in [
            json!({"mode": "blacklist"}),
            json!({"mode": "blacklist", "values": []}),
            json!({"mode": "blacklist", "values": "1.1.1.1"}),
        ] {
            let paths = field_paths(RuleListInput::<IpRules>::parse(&body).unwrap_err());
            assert_eq!(paths, vec!["values"]);
        }
    }

    #[test]
    fn invalid_values_are_reported_by_index() {
        let body = json!({"mode": "whitelist", "values": ["1.1.1.1", "999.0.0.1", "x"]});
        let paths = field_paths(RuleListInput::<IpRules>::parse(&body).unwrap_err());
        assert_eq!(paths, vec!["values.1", "values.2"]);
    }

    #[test]
    fn port_batch_rejects_numeric_strings() {
        let body = json!({"mode": "blacklist", "values": [80, "443"]});
        let paths = field_paths(RuleListInput::<PortRules>::parse(&body).unwrap_err());
        assert_eq!(paths, vec!["values.1"]);
    }

    #[test]
    fn url_batch_normalizes_case() {
        let body = json!({"mode": "blacklist", "values": ["Example.COM"]});
        let input = RuleListInput::<UrlRules>::parse(&body).unwrap();
        assert_eq!(input.values, vec!["example.com"]);
    }

    #[test]
    fn update_all_defaults_absent_sections_to_noop() {
        let body = json!({"urls": {"ids": [1, 2], "mode": "whitelist", "active": true}});
        let input = UpdateAllInput::parse(&body).unwrap();
        assert_eq!(input.urls.ids, vec![1, 2]);
        assert_eq!(input.urls.mode, Mode::Whitelist);
        assert!(input.urls.active);
        assert_eq!(input.ports, UpdateListInput::default());
        assert_eq!(input.ips, UpdateListInput::default());
        assert!(input.ports.ids.is_empty());
    }

    #[test]
    fn update_all_rejects_bad_ids_and_mode() {
        let body = json!({
            "ports": {"ids": [0, "7"], "mode": "greylist", "active": "yes"}
        });
        let paths = field_paths(UpdateAllInput::parse(&body).unwrap_err());
        assert_eq!(
            paths,
            vec!["ports.ids.0", "ports.ids.1", "ports.mode", "ports.active"]
        );
    }

    #[test]
    fn update_all_rejects_non_object_body() {
        match UpdateAllInput::parse(&json!([1, 2, 3])) {
            Err(FwError::BadRequest(_)) => {}
            other => panic!("예상 밖 결과: {other:?}"),
        }
    }
}
