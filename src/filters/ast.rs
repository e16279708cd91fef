use crate::storage::{CategoryMatch, SortMode};

/// Field prefixes recognized by the list query parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    /// Require a category (`category:` or its alias `tag:`)
    Category,
    /// Whether all or any of the categories must match
    Match,
    /// Listing order
    Sort,
}

/// Parsed list query
///
/// - Categories are AND-matched unless `match:any` asks for OR
/// - Search terms are matched as one phrase, joined by single spaces
/// - The last `sort:` and `match:` win
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListExpr {
    pub search_terms: Vec<String>,
    pub categories: Vec<String>,
    pub category_match: Option<CategoryMatch>,
    pub sort: Option<SortMode>,
}

impl ListExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_search_term(&mut self, term: impl Into<String>) {
        self.search_terms.push(term.into());
    }

    pub fn add_category(&mut self, name: impl Into<String>) {
        self.categories.push(name.into());
    }

    pub fn search_text(&self) -> String {
        self.search_terms.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.search_terms.is_empty()
            && self.categories.is_empty()
            && self.category_match.is_none()
            && self.sort.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_expr_empty() {
        let expr = ListExpr::new();
        assert!(expr.is_empty());
        assert_eq!(expr.search_text(), "");
    }

    #[test]
    fn test_search_text_joins_terms() {
        let mut expr = ListExpr::new();
        expr.add_search_term("borrow");
        expr.add_search_term("checker");
        assert_eq!(expr.search_text(), "borrow checker");
        assert!(!expr.is_empty());
    }

    #[test]
    fn test_sort_alone_is_not_empty() {
        let expr = ListExpr { sort: Some(SortMode::Title), ..ListExpr::new() };
        assert!(!expr.is_empty());
    }
}
