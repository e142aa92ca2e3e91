//! Reading the head of a `CREATE TABLE` statement.
//!
//! Only what the test backend needs: the table name, whether the statement
//! is guarded by `IF NOT EXISTS`, and the tables named in `REFERENCES`
//! clauses. This is not a SQL parser.

/// Summary of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    pub table: String,
    pub if_not_exists: bool,
    /// Referenced tables in order of first appearance, without duplicates.
    pub references: Vec<String>,
}

/// Returns `None` when `sql` does not start with `CREATE TABLE`.
pub fn parse_create_table(sql: &str) -> Option<CreateTableStatement> {
    let tokens: Vec<&str> = sql.split_whitespace().collect();

    let is_create = matches!(
        tokens.get(0..2),
        Some([create, table]) if create.eq_ignore_ascii_case("CREATE") && table.eq_ignore_ascii_case("TABLE")
    );
    if !is_create {
        return None;
    }

    let if_not_exists = matches!(
        tokens.get(2..5),
        Some([a, b, c])
            if a.eq_ignore_ascii_case("IF")
                && b.eq_ignore_ascii_case("NOT")
                && c.eq_ignore_ascii_case("EXISTS")
    );
    let name_index = if if_not_exists { 5 } else { 2 };
    let table = identifier(tokens.get(name_index)?)?;

    let mut references: Vec<String> = Vec::new();
    for pair in tokens.windows(2) {
        if pair[0].eq_ignore_ascii_case("REFERENCES") {
            if let Some(referenced) = identifier(pair[1]) {
                if !references.contains(&referenced) {
                    references.push(referenced);
                }
            }
        }
    }

    Some(CreateTableStatement {
        table,
        if_not_exists,
        references,
    })
}

/// `employees(id),` -> `employees`
fn identifier(token: &str) -> Option<String> {
    let name = token
        .split('(')
        .next()?
        .trim_matches(|c: char| c == '"' || c == ',' || c == ';');
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guarded_statement() {
        let parsed = parse_create_table(
            "CREATE TABLE IF NOT EXISTS leaves (id UUID, employee_id UUID REFERENCES employees(id));",
        )
        .unwrap();
        assert_eq!(parsed.table, "leaves");
        assert!(parsed.if_not_exists);
        assert_eq!(parsed.references, vec!["employees".to_string()]);
    }

    #[test]
    fn test_parse_unguarded_statement() {
        let parsed = parse_create_table("create table Users(id uuid)").unwrap();
        assert_eq!(parsed.table, "users");
        assert!(!parsed.if_not_exists);
        assert!(parsed.references.is_empty());
    }

    #[test]
    fn test_references_are_deduplicated() {
        let parsed = parse_create_table(
            "CREATE TABLE t (a UUID REFERENCES users(id), b UUID REFERENCES users(id))",
        )
        .unwrap();
        assert_eq!(parsed.references, vec!["users".to_string()]);
    }

    #[test]
    fn test_non_create_statement_is_ignored() {
        assert_eq!(parse_create_table("DROP TABLE users"), None);
        assert_eq!(parse_create_table(""), None);
        assert_eq!(parse_create_table("CREATE TABLE"), None);
    }
}
