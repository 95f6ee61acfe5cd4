/// 테이블 생성 쿼리
pub const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS port_rules (
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        value INTEGER NOT NULL UNIQUE,
        mode TEXT NOT NULL,
        active BOOLEAN NOT NULL DEFAULT TRUE
    )
";

/// 인덱스 생성 쿼리
pub const CREATE_INDICES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS port_rules_mode_idx ON port_rules(mode)",
    "CREATE INDEX IF NOT EXISTS port_rules_active_idx ON port_rules(active)",
];
