use serde::Serialize;

/// Source vs destination row count of one table after restore.
///
/// A count is `None` when the query for that side failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCountCheck {
    pub table: String,
    pub source_rows: Option<i64>,
    pub destination_rows: Option<i64>,
}

impl RowCountCheck {
    pub fn matches(&self) -> bool {
        matches!((self.source_rows, self.destination_rows), (Some(s), Some(d)) if s == d)
    }
}

/// Outcome of a completed sync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub truncated_tables: Vec<String>,
    pub dump_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Vec<RowCountCheck>>,
    pub duration_ms: f64,
}

impl SyncReport {
    pub fn mismatches(&self) -> impl Iterator<Item = &RowCountCheck> {
        self.verification
            .iter()
            .flatten()
            .filter(|check| !check.matches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatches_include_failed_queries() {
        let report = SyncReport {
            verification: Some(vec![
                RowCountCheck {
                    table: "orders".to_string(),
                    source_rows: Some(10),
                    destination_rows: Some(10),
                },
                RowCountCheck {
                    table: "carts".to_string(),
                    source_rows: Some(3),
                    destination_rows: Some(2),
                },
                RowCountCheck {
                    table: "wishlist".to_string(),
                    source_rows: None,
                    destination_rows: Some(0),
                },
            ]),
            ..SyncReport::default()
        };

        let tables: Vec<&str> = report.mismatches().map(|c| c.table.as_str()).collect();
        assert_eq!(tables, vec!["carts", "wishlist"]);
    }

    #[test]
    fn serializes_without_verification_when_skipped() {
        let report = SyncReport {
            truncated_tables: vec!["orders".to_string()],
            dump_bytes: 2048,
            ..SyncReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dump_bytes"], 2048);
        assert!(json.get("verification").is_none());
    }
}
