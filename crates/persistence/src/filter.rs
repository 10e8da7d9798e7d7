//! Dynamic WHERE-clause construction.
//!
//! Every list endpoint composes its filter from optional parts: equality
//! clauses, a `created_at` range, and a case-insensitive substring search
//! across a fixed set of columns. Repositories build the clause once and
//! run both the count query and the page slice against it, binding values
//! in the same order the clauses were pushed.

/// Accumulates SQL conditions with positional parameter placeholders.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    next_param: usize,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            next_param: 1,
        }
    }

    /// Add a condition that consumes one bind parameter. The closure
    /// receives the parameter index to splice into the SQL fragment.
    pub fn push(&mut self, build: impl FnOnce(usize) -> String) {
        let condition = build(self.next_param);
        self.next_param += 1;
        self.conditions.push(condition);
    }

    /// Add a condition with no bind parameter.
    pub fn push_raw(&mut self, condition: impl Into<String>) {
        self.conditions.push(condition.into());
    }

    /// The full `WHERE` clause, or an empty string when unfiltered.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Index of the next unused bind parameter (for LIMIT/OFFSET).
    pub fn next_param(&self) -> usize {
        self.next_param
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Turn user search input into an ILIKE pattern, escaping the LIKE
/// metacharacters so they match literally.
pub fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_has_no_where_clause() {
        let filter = FilterBuilder::new();
        assert_eq!(filter.where_clause(), "");
        assert_eq!(filter.next_param(), 1);
        assert!(filter.is_empty());
    }

    #[test]
    fn conditions_join_with_and_and_number_sequentially() {
        let mut filter = FilterBuilder::new();
        filter.push(|i| format!("status = ${i}"));
        filter.push(|i| format!("created_at >= ${i}"));
        filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i})"));

        assert_eq!(
            filter.where_clause(),
            " WHERE status = $1 AND created_at >= $2 AND (name ILIKE $3 OR email ILIKE $3)"
        );
        assert_eq!(filter.next_param(), 4);
    }

    #[test]
    fn raw_conditions_consume_no_parameter() {
        let mut filter = FilterBuilder::new();
        filter.push_raw("active = true");
        filter.push(|i| format!("position >= ${i}"));

        assert_eq!(
            filter.where_clause(),
            " WHERE active = true AND position >= $1"
        );
        assert_eq!(filter.next_param(), 2);
    }

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("theme"), "%theme%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
    }
}
