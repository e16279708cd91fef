//! List query parser.
//!
//! Turns the one-line query accepted by `chat-labels list` into a [`ListExpr`].
//!
//! # Syntax
//!
//! ```text
//! query := term*
//! term  := field:value | field:"quoted value" | word | "quoted words"
//! field := category | tag | match | sort (case-insensitive)
//! ```
//!
//! # Supported Fields
//!
//! - `category:name` / `tag:name` - chat must carry the category (repeatable)
//! - `match:all|any` - all listed categories required (default) or any one of them
//! - `sort:newest|oldest|title` - listing order (last one wins)
//!
//! Bare words and `field:value` pairs with any other field are search text.
//!
//! # Examples
//!
//! ```rust
//! # use chat_labels::filters::parse_query;
//! let expr = parse_query("category:work tag:\"deep learning\" sort:oldest borrow checker").unwrap();
//! assert_eq!(expr.categories, vec!["work", "deep learning"]);
//! assert_eq!(expr.search_text(), "borrow checker");
//! ```
//!
//! # Validation
//!
//! - Unterminated quotes are rejected
//! - `category`/`tag`/`match`/`sort` need a non-empty value; `match` and `sort` must be
//!   known modes

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Context, Result, anyhow};

use super::ast::{ListExpr, QueryField};
use crate::storage::{CategoryMatch, SortMode};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// field:value or field:"quoted value"
    FieldValue { field: String, value: String },
    /// Plain word or quoted phrase
    Text(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        if word.starts_with('"') {
            let phrase = read_quoted_value(&mut chars, &word)?;
            if !phrase.trim().is_empty() {
                tokens.push(Token::Text(phrase));
            }
            continue;
        }

        match word.find(':') {
            Some(colon_pos) if colon_pos > 0 => {
                let field = word[..colon_pos].to_string();
                let mut value = word[colon_pos + 1..].to_string();

                if value.starts_with('"') {
                    value = read_quoted_value(&mut chars, &value)?;
                }

                tokens.push(Token::FieldValue { field, value });
            }
            _ => tokens.push(Token::Text(word)),
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value whose opening quote (and maybe more) is already in `initial`
fn read_quoted_value(chars: &mut Peekable<Chars>, initial: &str) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Option<QueryField> {
    match field.to_lowercase().as_str() {
        "category" | "tag" => Some(QueryField::Category),
        "match" => Some(QueryField::Match),
        "sort" => Some(QueryField::Sort),
        _ => None,
    }
}

/// Parse a list query
///
/// Examples:
/// - "rust" → search text "rust"
/// - "category:work tag:home" → both categories required
/// - "sort:title" → title order
/// - "url:http://x" → search text "url:http://x" (unknown field)
pub fn parse_query(input: &str) -> Result<ListExpr> {
    let mut expr = ListExpr::new();
    if input.trim().is_empty() {
        return Ok(expr);
    }

    let tokens = tokenize(input).context("Failed to tokenize query")?;

    for token in tokens {
        match token {
            Token::Text(text) => expr.add_search_term(text),
            Token::FieldValue { field, value } => match parse_field(&field) {
                Some(known) => {
                    if value.trim().is_empty() {
                        return Err(anyhow!("Missing value for '{}:'", field));
                    }
                    match known {
                        QueryField::Category => expr.add_category(value.trim()),
                        QueryField::Match => {
                            expr.category_match = Some(value.parse::<CategoryMatch>()?)
                        }
                        QueryField::Sort => expr.sort = Some(value.parse::<SortMode>()?),
                    }
                }
                None => expr.add_search_term(format!("{}:{}", field, value)),
            },
        }
    }

    Ok(expr)
}
