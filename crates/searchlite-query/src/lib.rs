//! Searchlite Query - Filter Expression Compiler
//!
//! Compiles the declarative, string-encoded filter and facet-filter syntax
//! into a boolean expression tree, renders that tree in the store-native
//! quoted string form, and lowers it to the store's structured filter for
//! execution.
//!
//! Key Features:
//! - Typed expression tree: token | OR-group | AND-list
//! - Recursive-descent parser for the filter string syntax
//! - Facet-filter normalization (string, string-encoded array, nested array)
//! - Value quoting rules applied once, at compile time
//!
//! @version 0.1.0
//! @author Searchlite Development Team

pub mod ast;
pub mod facet;
pub mod parser;

pub use ast::{FilterExpr, FilterToken};
pub use facet::facet_filters_expr;
pub use parser::parse_filters;
