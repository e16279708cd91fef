//! Chat listing query: search text, category filter (all or any) and sort order.
//!
//! The SQL text depends only on the sort mode. Search text, the category id set and the match
//! mode are always bound as parameters; the id set travels as one JSON array expanded with
//! `json_each`, so the statement is identical for one category or twenty.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};

/// Order of a chat listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Newest `created_at` first, undated chats last
    #[default]
    Newest,
    /// Oldest `created_at` first, undated chats last
    Oldest,
    /// Title A to Z (case-insensitive)
    Title,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Title => "title",
        }
    }

    fn order_by(&self) -> &'static str {
        match self {
            SortMode::Newest => {
                "ORDER BY datetime(c.created_at) DESC NULLS LAST, c.title COLLATE NOCASE ASC, c.id ASC"
            }
            SortMode::Oldest => {
                "ORDER BY datetime(c.created_at) ASC NULLS LAST, c.title COLLATE NOCASE ASC, c.id ASC"
            }
            SortMode::Title => "ORDER BY c.title COLLATE NOCASE ASC, c.id ASC",
        }
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "title" => Ok(SortMode::Title),
            _ => Err(anyhow!("Invalid sort mode: '{}' (must be newest, oldest or title)", s)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a category id set selects chats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryMatch {
    /// Chat carries every listed category (AND)
    #[default]
    All,
    /// Chat carries at least one listed category (OR)
    Any,
}

impl CategoryMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryMatch::All => "all",
            CategoryMatch::Any => "any",
        }
    }
}

impl FromStr for CategoryMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "and" => Ok(CategoryMatch::All),
            "any" | "or" => Ok(CategoryMatch::Any),
            _ => Err(anyhow!("Invalid category match: '{}' (must be all or any)", s)),
        }
    }
}

impl fmt::Display for CategoryMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criteria for [`crate::storage::Store::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatFilter {
    /// Case-insensitive substring matched against title or content (empty = no filter)
    pub search: String,
    /// Categories to filter on (empty = no filter)
    pub category_ids: Vec<i64>,
    pub category_match: CategoryMatch,
    pub sort: SortMode,
}

impl ChatFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn categories(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn category_match(mut self, category_match: CategoryMatch) -> Self {
        self.category_match = category_match;
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

const LIST_TEMPLATE: &str = "SELECT c.id, c.title, c.created_at, c.model,
            COALESCE(GROUP_CONCAT(cat.name, ', '), '') AS categories
     FROM chats c
     LEFT JOIN chat_categories cc ON cc.chat_id = c.id
     LEFT JOIN categories cat ON cat.id = cc.category_id
     WHERE (?1 = '' OR instr(lower(c.title), lower(?1)) > 0 OR instr(lower(c.content), lower(?1)) > 0)
       AND (json_array_length(?2) = 0 OR c.id IN (
             SELECT chat_id FROM chat_categories
             WHERE category_id IN (SELECT value FROM json_each(?2))
             GROUP BY chat_id
             HAVING COUNT(DISTINCT category_id) >= CASE ?3
                 WHEN 'any' THEN 1
                 ELSE (SELECT COUNT(DISTINCT value) FROM json_each(?2))
             END
           ))
     GROUP BY c.id";

/// A ready-to-run listing statement and its bound values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sql: String,
    pub search: String,
    /// JSON array of category ids, e.g. `[3,7]`
    pub category_ids_json: String,
    /// `all` or `any`
    pub category_match: &'static str,
}

impl ListQuery {
    pub fn build(filter: &ChatFilter) -> Self {
        let ids = filter.category_ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",");

        Self {
            sql: format!("{}\n     {}", LIST_TEMPLATE, filter.sort.order_by()),
            search: filter.search.clone(),
            category_ids_json: format!("[{}]", ids),
            category_match: filter.category_match.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_from_str() {
        assert_eq!("newest".parse::<SortMode>().unwrap(), SortMode::Newest);
        assert_eq!("OLDEST".parse::<SortMode>().unwrap(), SortMode::Oldest);
        assert_eq!("Title".parse::<SortMode>().unwrap(), SortMode::Title);
        assert!("random".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_sort_mode_default_is_newest() {
        assert_eq!(SortMode::default(), SortMode::Newest);
        assert_eq!(ChatFilter::new().sort, SortMode::Newest);
    }

    #[test]
    fn test_sql_text_independent_of_filter_values() {
        let small = ListQuery::build(&ChatFilter::new().categories([1]));
        let large = ListQuery::build(&ChatFilter::new().search("x").categories([1, 2, 3, 4, 5]));
        assert_eq!(small.sql, large.sql);
        assert!(!large.sql.contains("'x'"));
    }

    #[test]
    fn test_category_match_from_str() {
        assert_eq!("any".parse::<CategoryMatch>().unwrap(), CategoryMatch::Any);
        assert_eq!("OR".parse::<CategoryMatch>().unwrap(), CategoryMatch::Any);
        assert_eq!("All".parse::<CategoryMatch>().unwrap(), CategoryMatch::All);
        assert!("some".parse::<CategoryMatch>().is_err());
        assert_eq!(ChatFilter::new().category_match, CategoryMatch::All);
    }

    #[test]
    fn test_category_match_bound_not_inlined() {
        let all = ListQuery::build(&ChatFilter::new().categories([1, 2]));
        let any = ListQuery::build(
            &ChatFilter::new().categories([1, 2]).category_match(CategoryMatch::Any),
        );
        assert_eq!(all.sql, any.sql);
        assert_eq!(all.category_match, "all");
        assert_eq!(any.category_match, "any");
    }

    #[test]
    fn test_category_ids_bound_as_json_array() {
        let query = ListQuery::build(&ChatFilter::new().categories([3, 7]));
        assert_eq!(query.category_ids_json, "[3,7]");

        let empty = ListQuery::build(&ChatFilter::new());
        assert_eq!(empty.category_ids_json, "[]");
    }

    #[test]
    fn test_order_clause_per_sort_mode() {
        let newest = ListQuery::build(&ChatFilter::new());
        let oldest = ListQuery::build(&ChatFilter::new().sort(SortMode::Oldest));
        let title = ListQuery::build(&ChatFilter::new().sort(SortMode::Title));

        assert!(newest.sql.contains("DESC NULLS LAST"));
        assert!(oldest.sql.contains("ASC NULLS LAST"));
        assert!(!title.sql.contains("datetime("));
    }
}
