use std::marker::PhantomData;

use log::debug;
use serde::Serialize;
use tokio_postgres::{Row, Transaction};
use tokio_postgres::types::FromSqlOwned;

use fwadmin_error::{FwError, Result};
use fwadmin_rules::{Mode, RuleKind};

use crate::pool::DatabasePool;
use crate::sql;

/// 토글 사전검사 실패 메시지
pub const IDS_NOT_FOUND_MESSAGE: &str = "One or more of the requested id's not found";

/// 목록 조회 행 (id + 값)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRow<V> {
    pub id: i32,
    pub value: V,
}

/// 토글 결과 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedRule<V> {
    pub id: i32,
    pub value: V,
    pub active: bool,
}

/// 분류별 전체 목록
#[derive(Debug, Clone, Serialize)]
pub struct ModeRules<V> {
    pub blacklist: Vec<RuleRow<V>>,
    pub whitelist: Vec<RuleRow<V>>,
}

/// 규칙 종류 하나에 대한 저장소. 테이블과 값 타입은 `RuleKind`가 정한다.
pub struct RuleRepository<K: RuleKind> {
    pool: DatabasePool,
    _kind: PhantomData<K>,
}

impl<K: RuleKind> RuleRepository<K> {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }

    /// 값 배치 삽입. 전체가 한 트랜잭션으로 커밋되고, 하나라도 실패하면
    /// (유니크 제약 등) 모두 롤백된다.
    pub async fn insert_batch(&self, values: &[K::Value], mode: Mode) -> Result<()> {
        let mut conn = self.pool.get_connection().await?;
        let tx = conn.transaction().await?;

        let stmt = tx.prepare(&sql::insert_rule(K::TABLE)).await?;
        for value in values {
            tx.execute(&stmt, &[value, &mode.as_str()]).await?;
        }

        tx.commit().await?;
        debug!("{} 규칙 {}건 삽입 (mode: {mode})", K::LABEL, values.len());
        Ok(())
    }

    /// 값 + mode 양쪽이 일치하는 행만 배치 삭제. 존재하지 않는 값은
    /// 이 계층에서는 에러가 아니다 (사전검사는 호출자 책임).
    pub async fn delete_batch(&self, values: &[K::Value], mode: Mode) -> Result<()> {
        let mut conn = self.pool.get_connection().await?;
        let tx = conn.transaction().await?;

        let query = sql::delete_rules(K::TABLE);
        let deleted = tx
            .execute(query.as_str(), &[&values, &mode.as_str()])
            .await?;

        tx.commit().await?;
        debug!("{} 규칙 {deleted}건 삭제 (mode: {mode})", K::LABEL);
        Ok(())
    }

    /// 주어진 값 중 해당 mode로 저장되어 있는 부분집합 반환
    pub async fn find_existing(&self, values: &[K::Value], mode: Mode) -> Result<Vec<K::Value>> {
        let conn = self.pool.get_connection().await?;

        let query = sql::select_existing(K::TABLE);
        let rows = conn
            .query(query.as_str(), &[&values, &mode.as_str()])
            .await?;

        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            found.push(row.try_get(0)?);
        }
        Ok(found)
    }

    /// 분류별 전체 목록 조회
    pub async fn list_all(&self) -> Result<ModeRules<K::Value>> {
        let conn = self.pool.get_connection().await?;
        let stmt = conn.prepare(&sql::select_by_mode(K::TABLE)).await?;

        let blacklist = collect_rows(conn.query(&stmt, &[&Mode::Blacklist.as_str()]).await?)?;
        let whitelist = collect_rows(conn.query(&stmt, &[&Mode::Whitelist.as_str()]).await?)?;

        Ok(ModeRules {
            blacklist,
            whitelist,
        })
    }

    /// active 갱신. 호출자가 연 트랜잭션 안에서 수행되며, 자체 트랜잭션을
    /// 열지 않는다. id 목록이 비어 있으면 저장소를 건드리지 않는 no-op.
    /// mode 불일치 등으로 재조회 개수가 요청 개수와 다르면 아무것도
    /// 갱신하지 않고 NotFound를 돌려준다.
    pub async fn update_active(
        tx: &Transaction<'_>,
        ids: &[i32],
        mode: Mode,
        active: bool,
    ) -> Result<Vec<UpdatedRule<K::Value>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let precheck = sql::select_ids(K::TABLE);
        let found = tx.query(precheck.as_str(), &[&ids, &mode.as_str()]).await?;
        if found.len() != ids.len() {
            return Err(FwError::NotFound(IDS_NOT_FOUND_MESSAGE.to_string()));
        }

        let update = sql::update_active(K::TABLE);
        let rows = tx
            .query(update.as_str(), &[&ids, &mode.as_str(), &active])
            .await?;

        let mut updated = Vec::with_capacity(rows.len());
        for row in rows {
            updated.push(updated_rule(&row)?);
        }
        Ok(updated)
    }
}

fn collect_rows<V: FromSqlOwned>(rows: Vec<Row>) -> Result<Vec<RuleRow<V>>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(RuleRow {
            id: row.try_get(0)?,
            value: row.try_get(1)?,
        });
    }
    Ok(out)
}

fn updated_rule<V: FromSqlOwned>(row: &Row) -> Result<UpdatedRule<V>> {
    Ok(UpdatedRule {
        id: row.try_get(0)?,
        value: row.try_get(1)?,
        active: row.try_get(2)?,
    })
}
