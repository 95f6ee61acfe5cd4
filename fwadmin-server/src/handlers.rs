use std::collections::HashSet;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use log::error;
use serde_json::{Value as Json, json};

use fwadmin_db::repository::RuleRepository;
use fwadmin_db::toggle::toggle_status;
use fwadmin_error::FwError;
use fwadmin_rules::{IpRules, Mode, PortRules, RuleKind, RuleListInput, UpdateAllInput, UrlRules};

use crate::response::{error_response, error_to_response, json_response};
use crate::state::AppState;

type HttpResponse = Response<Full<Bytes>>;

/// 삭제 사전검사. 요청된 값 중 해당 mode로 저장되어 있지 않은 것이 하나라도
/// 있으면 종류별 미존재 메시지를 담은 400 거부 응답을 돌려준다. 요청에
/// 중복된 값이 있어도 저장된 값이면 누락으로 치지 않는다.
fn reject_missing<K: RuleKind>(
    requested: &[K::Value],
    existing: &[K::Value],
) -> Option<HttpResponse> {
    let existing: HashSet<&K::Value> = existing.iter().collect();
    if requested.iter().any(|v| !existing.contains(v)) {
        Some(error_response(StatusCode::BAD_REQUEST, K::NOT_FOUND_MESSAGE))
    } else {
        None
    }
}

/// 추가/삭제 성공시 요청을 그대로 돌려주는 에코 응답
fn success_echo<K: RuleKind>(mode: Mode, values: &[K::Value]) -> HttpResponse {
    json_response(
        StatusCode::OK,
        &json!({
            "type": K::LABEL,
            "mode": mode,
            "values": values,
            "status": "success",
        }),
    )
}

/// 규칙 배치 추가. 전체가 커밋되거나 전혀 커밋되지 않는다 (부분 성공 없음).
pub async fn add_rules<K: RuleKind>(state: &AppState, body: &Json) -> HttpResponse {
    let input = match RuleListInput::<K>::parse(body) {
        Ok(input) => input,
        Err(e) => return error_to_response(&e),
    };

    let repo = RuleRepository::<K>::new(state.db_pool.clone());
    match repo.insert_batch(&input.values, input.mode).await {
        Ok(()) => success_echo::<K>(input.mode, &input.values),
        Err(e) => {
            error!("{} 규칙 추가 실패: {e}", K::LABEL);
            error_to_response(&e)
        }
    }
}

/// 규칙 배치 삭제. 요청된 값 중 하나라도 저장되어 있지 않으면 아무것도
/// 지우지 않고 거부한다. 사전검사와 삭제 사이의 경쟁은 문서화된 허용
/// 실패 모델이다 (검사 이후의 동시 삭제는 감지하지 않는다).
pub async fn remove_rules<K: RuleKind>(state: &AppState, body: &Json) -> HttpResponse {
    let input = match RuleListInput::<K>::parse(body) {
        Ok(input) => input,
        Err(e) => return error_to_response(&e),
    };

    let repo = RuleRepository::<K>::new(state.db_pool.clone());

    let existing = match repo.find_existing(&input.values, input.mode).await {
        Ok(existing) => existing,
        Err(e) => {
            error!("{} 규칙 사전검사 실패: {e}", K::LABEL);
            return error_to_response(&e);
        }
    };

    if let Some(rejection) = reject_missing::<K>(&input.values, &existing) {
        return rejection;
    }

    match repo.delete_batch(&input.values, input.mode).await {
        Ok(()) => success_echo::<K>(input.mode, &input.values),
        Err(e) => {
            error!("{} 규칙 삭제 실패: {e}", K::LABEL);
            error_to_response(&e)
        }
    }
}

/// 세 종류 전체 목록 조회. 종류간 순서 의존성이 없어 동시에 질의한다.
/// `type` 쿼리가 있으면 해당 종류만 돌려준다.
pub async fn get_all_rules(state: &AppState, type_filter: Option<&str>) -> HttpResponse {
    let ip_repo = RuleRepository::<IpRules>::new(state.db_pool.clone());
    let url_repo = RuleRepository::<UrlRules>::new(state.db_pool.clone());
    let port_repo = RuleRepository::<PortRules>::new(state.db_pool.clone());

    let (ips, urls, ports) =
        match tokio::try_join!(ip_repo.list_all(), url_repo.list_all(), port_repo.list_all()) {
            Ok(lists) => lists,
            Err(e) => {
                error!("규칙 목록 조회 실패: {e}");
                return error_to_response(&e);
            }
        };

    let data = json!({ "ips": ips, "urls": urls, "ports": ports });
    match type_filter {
        None => json_response(StatusCode::OK, &data),
        Some(kind) => match data.get(kind) {
            Some(section) => json_response(StatusCode::OK, section),
            None => error_response(
                StatusCode::BAD_REQUEST,
                "'type' must be one of ips, urls or ports",
            ),
        },
    }
}

/// 종류별 active 토글. 세 종류가 한 트랜잭션으로 함께 커밋되며,
/// 생략된 종류는 no-op이다.
pub async fn toggle_rules(state: &AppState, body: &Json) -> HttpResponse {
    let input = match UpdateAllInput::parse(body) {
        Ok(input) => input,
        Err(e) => return error_to_response(&e),
    };

    match toggle_status(&state.db_pool, &input).await {
        Ok(outcome) => json_response(StatusCode::OK, &outcome),
        Err(e) => {
            if !matches!(e, FwError::NotFound(_)) {
                error!("규칙 토글 실패: {e}");
            }
            error_to_response(&e)
        }
    }
}
