pub mod ip_rules;
pub mod url_rules;
pub mod port_rules;

/// 값 삽입 쿼리
pub fn insert_rule(table: &str) -> String {
    format!("INSERT INTO {table} (value, mode) VALUES ($1, $2)")
}

/// 값 + mode 조건 배치 삭제 쿼리
pub fn delete_rules(table: &str) -> String {
    format!("DELETE FROM {table} WHERE value = ANY($1) AND mode = $2")
}

/// 저장된 값 부분집합 조회 쿼리 (삭제 사전검사용)
pub fn select_existing(table: &str) -> String {
    format!("SELECT value FROM {table} WHERE value = ANY($1) AND mode = $2")
}

/// 분류별 전체 목록 조회 쿼리
pub fn select_by_mode(table: &str) -> String {
    format!("SELECT id, value FROM {table} WHERE mode = $1 ORDER BY id")
}

/// id 재조회 쿼리 (토글 사전검사용)
pub fn select_ids(table: &str) -> String {
    format!("SELECT id FROM {table} WHERE id = ANY($1) AND mode = $2")
}

/// active 갱신 쿼리
pub fn update_active(table: &str) -> String {
    format!(
        "UPDATE {table} SET active = $3 WHERE id = ANY($1) AND mode = $2 \
         RETURNING id, value, active"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_target_the_given_table() {
        assert_eq!(
            insert_rule("ip_rules"),
            "INSERT INTO ip_rules (value, mode) VALUES ($1, $2)"
        );
        assert!(delete_rules("url_rules").starts_with("DELETE FROM url_rules "));
        assert!(select_existing("port_rules").contains("FROM port_rules"));
        assert!(select_by_mode("ip_rules").ends_with("ORDER BY id"));
        assert!(select_ids("url_rules").contains("id = ANY($1)"));
        assert!(update_active("port_rules").contains("RETURNING id, value, active"));
    }
}
