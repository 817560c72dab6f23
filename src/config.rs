use serde::Deserialize;

/// Table options appended to every `CREATE TABLE`. Empty values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    pub engine: String,
    pub charset: String,
    pub collate: String,
}

impl DbConfig {
    pub fn new(engine: &str, charset: &str, collate: &str) -> Self {
        Self {
            engine: engine.to_string(),
            charset: charset.to_string(),
            collate: collate.to_string(),
        }
    }

    /// Overlay the non-empty values of `other` onto `self`.
    pub fn merge(mut self, other: DbConfig) -> Self {
        if !other.engine.is_empty() {
            self.engine = other.engine;
        }
        if !other.charset.is_empty() {
            self.charset = other.charset;
        }
        if !other.collate.is_empty() {
            self.collate = other.collate;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_values() {
        let base = DbConfig::new("InnoDB", "utf8mb4", "utf8mb4_bin");
        let merged = base.merge(DbConfig {
            collate: "utf8mb4_general_ci".to_string(),
            ..Default::default()
        });
        assert_eq!(
            merged,
            DbConfig::new("InnoDB", "utf8mb4", "utf8mb4_general_ci")
        );
    }
}
