use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response, StatusCode};
use log::debug;
use serde_json::Value as Json;

use fwadmin_error::{FwError, Result};
use fwadmin_rules::{IpRules, PortRules, UrlRules};

use crate::handlers::{add_rules, get_all_rules, remove_rules, toggle_rules};
use crate::response::error_response;
use crate::state::AppState;

/// REST 베이스 경로
const BASE_PATH: &str = "/api/firewall";

/// 라우팅 대상 엔드포인트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AddIp,
    RemoveIp,
    AddUrl,
    RemoveUrl,
    AddPort,
    RemovePort,
    ListRules,
    ToggleRules,
}

/// 메서드 + 경로 -> 엔드포인트 매칭
pub fn match_endpoint(method: &Method, path: &str) -> Option<Endpoint> {
    let rest = path.strip_prefix(BASE_PATH)?;
    let rest = if rest.len() > 1 {
        rest.trim_end_matches('/')
    } else {
        rest
    };

    match rest {
        "/ip" if method == Method::POST => Some(Endpoint::AddIp),
        "/ip" if method == Method::DELETE => Some(Endpoint::RemoveIp),
        "/url" if method == Method::POST => Some(Endpoint::AddUrl),
        "/url" if method == Method::DELETE => Some(Endpoint::RemoveUrl),
        "/port" if method == Method::POST => Some(Endpoint::AddPort),
        "/port" if method == Method::DELETE => Some(Endpoint::RemovePort),
        "/rules" if method == Method::GET => Some(Endpoint::ListRules),
        "/rules" if method == Method::PATCH => Some(Endpoint::ToggleRules),
        _ => None,
    }
}

/// 쿼리 문자열에서 type 파라미터 추출
pub fn parse_type_query(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("type="))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 요청 핸들러. 경로 매칭 후 본문을 수집해 해당 핸들러로 넘긴다.
pub async fn handle_request(
    req: Request<Incoming>,
    state: AppState,
) -> Result<Response<Full<Bytes>>> {
    debug!("incoming: {} {}", req.method(), req.uri());

    let Some(endpoint) = match_endpoint(req.method(), req.uri().path()) else {
        return Ok(error_response(StatusCode::NOT_FOUND, "Not found"));
    };

    // GET은 본문 없이 처리
    if endpoint == Endpoint::ListRules {
        let type_filter = parse_type_query(req.uri().query());
        return Ok(get_all_rules(&state, type_filter.as_deref()).await);
    }

    let body_bytes = req
        .into_body()
        .collect()
        .await
        .map_err(|e| FwError::Http(format!("본문 수집 실패: {e}")))?
        .to_bytes();

    let body: Json = match serde_json::from_slice(&body_bytes) {
        Ok(body) => body,
        Err(_) => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "request body must be valid JSON",
            ));
        }
    };

    let response = match endpoint {
        Endpoint::AddIp => add_rules::<IpRules>(&state, &body).await,
        Endpoint::RemoveIp => remove_rules::<IpRules>(&state, &body).await,
        Endpoint::AddUrl => add_rules::<UrlRules>(&state, &body).await,
        Endpoint::RemoveUrl => remove_rules::<UrlRules>(&state, &body).await,
        Endpoint::AddPort => add_rules::<PortRules>(&state, &body).await,
        Endpoint::RemovePort => remove_rules::<PortRules>(&state, &body).await,
        Endpoint::ToggleRules => toggle_rules(&state, &body).await,
        Endpoint::ListRules => unreachable!("위에서 처리됨"),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table_matches_the_rest_surface() {
        let cases = [
            (Method::POST, "/api/firewall/ip", Some(Endpoint::AddIp)),
            (Method::DELETE, "/api/firewall/ip", Some(Endpoint::RemoveIp)),
            (Method::POST, "/api/firewall/url", Some(Endpoint::AddUrl)),
            (Method::DELETE, "/api/firewall/url", Some(Endpoint::RemoveUrl)),
            (Method::POST, "/api/firewall/port", Some(Endpoint::AddPort)),
            (Method::DELETE, "/api/firewall/port", Some(Endpoint::RemovePort)),
            (Method::GET, "/api/firewall/rules", Some(Endpoint::ListRules)),
            (Method::PATCH, "/api/firewall/rules", Some(Endpoint::ToggleRules)),
        ];
        for (method, path, expected) in cases {
            assert_eq!(match_endpoint(&method, path), expected, "{method} {path}");
        }
    }

    #[test]
    fn unknown_routes_do_not_match() {
        assert_eq!(match_endpoint(&Method::GET, "/api/firewall/ip"), None);
        assert_eq!(match_endpoint(&Method::POST, "/api/firewall/rules"), None);
        assert_eq!(match_endpoint(&Method::POST, "/ip"), None);
        assert_eq!(match_endpoint(&Method::GET, "/api/firewall"), None);
        assert_eq!(match_endpoint(&Method::GET, "/"), None);
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(
            match_endpoint(&Method::POST, "/api/firewall/ip/"),
            Some(Endpoint::AddIp)
        );
    }

    #[test]
    fn type_query_extraction() {
        assert_eq!(parse_type_query(Some("type=ips")), Some("ips".to_string()));
        assert_eq!(
            parse_type_query(Some("foo=1&type=ports")),
            Some("ports".to_string())
        );
        assert_eq!(parse_type_query(Some("type=")), None);
        assert_eq!(parse_type_query(Some("foo=1")), None);
        assert_eq!(parse_type_query(None), None);
    }
}
