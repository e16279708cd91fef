//! List query language
//!
//! `category:work tag:"deep learning" sort:oldest rust` → categories, sort mode, search text.

pub mod ast;
pub mod parser;

pub use ast::{ListExpr, QueryField};
pub use parser::parse_query;
