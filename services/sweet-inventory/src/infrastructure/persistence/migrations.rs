//! Schema 迁移

use sweetshop_adapter_postgres::Migration;

const CREATE_SWEETS: &str = r#"
CREATE TABLE IF NOT EXISTS sweets (
    id       BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name     TEXT           NOT NULL CHECK (char_length(name) >= 2),
    category TEXT           NOT NULL CHECK (char_length(category) >= 3),
    price    NUMERIC(12, 2) NOT NULL CHECK (price > 0),
    quantity BIGINT         NOT NULL CHECK (quantity >= 0)
);

CREATE INDEX IF NOT EXISTS idx_sweets_category ON sweets (category);
"#;

/// 本服务的全部迁移（按版本升序）
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(1, "create_sweets", CREATE_SWEETS)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_ascending() {
        let all = migrations();
        assert!(all.windows(2).all(|w| w[0].version < w[1].version));
        assert!(all[0].up_sql.contains("CREATE TABLE IF NOT EXISTS sweets"));
    }
}
