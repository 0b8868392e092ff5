//! SQL text generation for catalog introspection, truncation and row counts.

/// Quote an identifier the way PostgreSQL `format('%I')` does for untrusted
/// input: always double-quoted, embedded quotes doubled.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Schema-qualified, quoted table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Lists the tables of `schema`, one name per output row.
pub fn catalog_query(schema: &str) -> String {
    format!(
        "SELECT tablename FROM pg_tables WHERE schemaname = {} ORDER BY tablename",
        quote_literal(schema)
    )
}

pub fn row_count_query(schema: &str, table: &str) -> String {
    format!("SELECT count(*) FROM {}", qualified_table(schema, table))
}

/// A single TRUNCATE covering every non-excluded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatePlan {
    pub tables: Vec<String>,
    pub statement: String,
}

/// Plan the destination truncation from the catalog listing.
///
/// Returns `None` when nothing is left after applying the exclusion set, so no
/// empty statement is ever issued. Catalog order is preserved and duplicates
/// are dropped.
pub fn plan_truncate(
    schema: &str,
    catalog_tables: &[String],
    exclude_tables: &[String],
) -> Option<TruncatePlan> {
    let mut tables: Vec<String> = Vec::new();
    for table in catalog_tables {
        if exclude_tables.iter().any(|t| t == table) || tables.contains(table) {
            continue;
        }
        tables.push(table.clone());
    }

    if tables.is_empty() {
        return None;
    }

    let targets = tables
        .iter()
        .map(|t| qualified_table(schema, t))
        .collect::<Vec<_>>()
        .join(", ");

    Some(TruncatePlan {
        statement: format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE;", targets),
        tables,
    })
}
