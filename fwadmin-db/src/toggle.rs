use log::debug;
use serde::Serialize;

use fwadmin_error::Result;
use fwadmin_rules::{IpRules, PortRules, UpdateAllInput, UrlRules};

use crate::pool::DatabasePool;
use crate::repository::{RuleRepository, UpdatedRule};

/// PATCH /rules 응답 본문
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    #[serde(rename = "updatedUrls")]
    pub updated_urls: Vec<UpdatedRule<String>>,
    #[serde(rename = "updatedPorts")]
    pub updated_ports: Vec<UpdatedRule<i32>>,
    #[serde(rename = "updatedIps")]
    pub updated_ips: Vec<UpdatedRule<String>>,
}

/// 종류별 active 토글. 트랜잭션 하나를 열어 url, port, ip 순서로 갱신하고,
/// 어느 한 종류라도 실패하면 세 종류 모두 롤백된다 (all-or-nothing).
/// 생략된 종류는 빈 id 목록이라 보장된 no-op이다.
pub async fn toggle_status(pool: &DatabasePool, input: &UpdateAllInput) -> Result<ToggleOutcome> {
    let mut conn = pool.get_connection().await?;
    let tx = conn.transaction().await?;

    let updated_urls = RuleRepository::<UrlRules>::update_active(
        &tx,
        &input.urls.ids,
        input.urls.mode,
        input.urls.active,
    )
    .await?;
    let updated_ports = RuleRepository::<PortRules>::update_active(
        &tx,
        &input.ports.ids,
        input.ports.mode,
        input.ports.active,
    )
    .await?;
    let updated_ips = RuleRepository::<IpRules>::update_active(
        &tx,
        &input.ips.ids,
        input.ips.mode,
        input.ips.active,
    )
    .await?;

    tx.commit().await?;
    debug!(
        "토글 커밋 완료 (url: {}, port: {}, ip: {})",
        updated_urls.len(),
        updated_ports.len(),
        updated_ips.len()
    );

    Ok(ToggleOutcome {
        updated_urls,
        updated_ports,
        updated_ips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_uses_camel_case_keys() {
        let outcome = ToggleOutcome {
            updated_urls: vec![UpdatedRule {
                id: 1,
                value: "example.com".to_string(),
                active: true,
            }],
            updated_ports: vec![],
            updated_ips: vec![],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["updatedUrls"][0]["active"], true);
        assert!(json["updatedPorts"].as_array().unwrap().is_empty());
        assert!(json["updatedIps"].as_array().unwrap().is_empty());
    }
}
