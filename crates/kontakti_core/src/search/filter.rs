//! Search criteria and SQL shaping for contact lookups.
//!
//! # Responsibility
//! - Normalize optional name/phone/email filters.
//! - Build the `WHERE`/`ORDER BY`/`LIMIT` tail and its bind values.
//!
//! # Invariants
//! - Blank filters impose no constraint; filter values are trimmed.
//! - Substring filters escape `\`, `%` and `_` so they match literally.
//! - `offset` is only emitted together with `limit`.

use rusqlite::types::Value;

const LIKE_ESCAPE_CHAR: char = '\\';

/// Criteria for [`crate::repo::contact_repo::ContactRepository::search_contacts`].
///
/// All filters are optional and combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSearch {
    /// Matches against `Name`.
    pub name: Option<String>,
    /// Matches against `PhoneNumber`; contacts without a phone never match.
    pub phone: Option<String>,
    /// Matches against `Email`.
    pub email: Option<String>,
    /// `true` requires case-insensitive equality instead of containment.
    pub exact: bool,
    /// Maximum number of rows to return.
    pub limit: Option<u32>,
    /// Rows to skip from the ordered result. Ignored unless `limit` is set.
    pub offset: Option<u32>,
}

impl ContactSearch {
    /// Search with a single name filter in substring mode.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn filters(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("Name", normalize_filter(self.name.as_deref())),
            ("PhoneNumber", normalize_filter(self.phone.as_deref())),
            ("Email", normalize_filter(self.email.as_deref())),
        ]
    }
}

/// Escapes LIKE metacharacters so `value` matches itself literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push(LIKE_ESCAPE_CHAR);
        }
        escaped.push(ch);
    }
    escaped
}

/// Appends the filter, ordering and pagination clauses for `search` to
/// `select_sql` and returns the statement with its bind values.
pub(crate) fn build_search_sql(select_sql: &str, search: &ContactSearch) -> (String, Vec<Value>) {
    let mut where_clauses = Vec::new();
    let mut bind_values: Vec<Value> = Vec::new();

    for (column, term) in search.filters() {
        let Some(term) = term else {
            continue;
        };

        if search.exact {
            where_clauses.push(format!("{column} = ? COLLATE NOCASE"));
            bind_values.push(Value::Text(term.to_string()));
        } else {
            where_clauses.push(format!("{column} LIKE ? ESCAPE '\\'"));
            bind_values.push(Value::Text(format!("%{}%", escape_like(term))));
        }
    }

    let mut sql = String::from(select_sql);
    if !where_clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY Name COLLATE NOCASE, Id");

    if let Some(limit) = search.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if let Some(offset) = search.offset {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }
    }

    (sql, bind_values)
}

fn normalize_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|term| !term.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{build_search_sql, escape_like, ContactSearch};
    use rusqlite::types::Value;

    const SELECT: &str = "SELECT * FROM Contacts";

    #[test]
    fn escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn empty_search_only_orders() {
        let (sql, values) = build_search_sql(SELECT, &ContactSearch::default());
        assert_eq!(sql, "SELECT * FROM Contacts ORDER BY Name COLLATE NOCASE, Id");
        assert!(values.is_empty());
    }

    #[test]
    fn substring_filters_are_wrapped_escaped_and_anded() {
        let search = ContactSearch {
            name: Some("  jo_n ".to_string()),
            email: Some("x.com".to_string()),
            ..ContactSearch::default()
        };
        let (sql, values) = build_search_sql(SELECT, &search);

        assert_eq!(
            sql,
            "SELECT * FROM Contacts WHERE Name LIKE ? ESCAPE '\\' AND Email LIKE ? ESCAPE '\\' \
             ORDER BY Name COLLATE NOCASE, Id"
        );
        assert_eq!(
            values,
            vec![
                Value::Text("%jo\\_n%".to_string()),
                Value::Text("%x.com%".to_string()),
            ]
        );
    }

    #[test]
    fn exact_filters_use_nocase_equality_without_escaping() {
        let search = ContactSearch {
            phone: Some(" 555_01 ".to_string()),
            exact: true,
            ..ContactSearch::default()
        };
        let (sql, values) = build_search_sql(SELECT, &search);

        assert!(sql.contains("WHERE PhoneNumber = ? COLLATE NOCASE"));
        assert_eq!(values, vec![Value::Text("555_01".to_string())]);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let search = ContactSearch {
            name: Some("   ".to_string()),
            phone: Some(String::new()),
            ..ContactSearch::default()
        };
        let (sql, values) = build_search_sql(SELECT, &search);
        assert!(!sql.contains("WHERE"));
        assert!(values.is_empty());
    }

    #[test]
    fn offset_requires_limit() {
        let offset_only = ContactSearch {
            offset: Some(3),
            ..ContactSearch::default()
        };
        let (sql, values) = build_search_sql(SELECT, &offset_only);
        assert!(!sql.contains("OFFSET"));
        assert!(values.is_empty());

        let paged = ContactSearch {
            limit: Some(2),
            offset: Some(1),
            ..ContactSearch::default()
        };
        let (sql, values) = build_search_sql(SELECT, &paged);
        assert!(sql.ends_with(" LIMIT ? OFFSET ?"));
        assert_eq!(values, vec![Value::Integer(2), Value::Integer(1)]);
    }
}
