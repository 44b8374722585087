//! Searchlite Filter AST
//!
//! The typed filter expression tree produced by the compiler, its rendering
//! in the store-native quoted string form, and its lowering to the store's
//! structured filter.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use searchlite_store::Filter;
use std::fmt;

// =============================================================================
// Filter Token
// =============================================================================

/// One `field:value` equality term.
///
/// The value is held unquoted; any quote characters in the raw input are
/// stripped at construction so rendering can re-quote consistently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToken {
    pub field: String,
    pub value: String,
}

impl FilterToken {
    pub fn new(field: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let raw = raw_value.into();
        Self {
            field: field.into(),
            value: raw.replace(['"', '\''], ""),
        }
    }

    fn to_filter(&self) -> Filter {
        Filter::Eq {
            field: self.field.clone(),
            value: self.value.clone(),
        }
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\":\"{}\"", self.field, self.value)
    }
}

// =============================================================================
// Filter Expression
// =============================================================================

/// A compiled filter expression: a single token, an OR-group of alternative
/// tokens, or an AND-list of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    Token(FilterToken),
    OrGroup(Vec<FilterToken>),
    AndList(Vec<FilterExpr>),
}

impl FilterExpr {
    /// Lower to the store's structured filter form.
    pub fn to_filter(&self) -> Filter {
        match self {
            Self::Token(token) => token.to_filter(),
            Self::OrGroup(tokens) => Filter::Or(tokens.iter().map(FilterToken::to_filter).collect()),
            Self::AndList(groups) => Filter::And(groups.iter().map(Self::to_filter).collect()),
        }
    }
}

impl fmt::Display for FilterExpr {
    /// Render in the store-native string form: tokens quoted, OR-groups
    /// parenthesized (a singleton group still gets parentheses), groups
    /// joined with `AND`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{}", token),
            Self::OrGroup(tokens) => {
                write!(f, "(")?;
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        write!(f, " OR ")?;
                    }
                    write!(f, "{}", token)?;
                }
                write!(f, ")")
            }
            Self::AndList(groups) => {
                for (i, group) in groups.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{}", group)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_strips_preexisting_quotes() {
        let token = FilterToken::new("color", "\"red\"");
        assert_eq!(token.value, "red");
        assert_eq!(token.to_string(), "\"color\":\"red\"");

        let token = FilterToken::new("name", "o'brien");
        assert_eq!(token.value, "obrien");
    }

    #[test]
    fn test_token_renders_quoted() {
        let token = FilterToken::new("brand", "new balance");
        assert_eq!(token.to_string(), "\"brand\":\"new balance\"");
    }

    #[test]
    fn test_or_group_renders_parenthesized() {
        let expr = FilterExpr::OrGroup(vec![
            FilterToken::new("color", "red"),
            FilterToken::new("color", "blue"),
        ]);
        assert_eq!(expr.to_string(), "(\"color\":\"red\" OR \"color\":\"blue\")");
    }

    #[test]
    fn test_singleton_or_group_keeps_parentheses() {
        let expr = FilterExpr::OrGroup(vec![FilterToken::new("brand", "nike")]);
        assert_eq!(expr.to_string(), "(\"brand\":\"nike\")");
    }

    #[test]
    fn test_and_list_rendering() {
        let expr = FilterExpr::AndList(vec![
            FilterExpr::OrGroup(vec![
                FilterToken::new("color", "red"),
                FilterToken::new("color", "blue"),
            ]),
            FilterExpr::OrGroup(vec![FilterToken::new("brand", "nike")]),
        ]);
        assert_eq!(
            expr.to_string(),
            "(\"color\":\"red\" OR \"color\":\"blue\") AND (\"brand\":\"nike\")"
        );
    }

    #[test]
    fn test_lowering_to_store_filter() {
        use searchlite_store::Filter;

        let expr = FilterExpr::AndList(vec![
            FilterExpr::Token(FilterToken::new("color", "red")),
            FilterExpr::OrGroup(vec![
                FilterToken::new("brand", "nike"),
                FilterToken::new("brand", "adidas"),
            ]),
        ]);

        let filter = expr.to_filter();
        let Filter::And(groups) = filter else {
            panic!("expected And");
        };
        assert_eq!(groups.len(), 2);
        assert!(matches!(&groups[0], Filter::Eq { field, value } if field == "color" && value == "red"));
        assert!(matches!(&groups[1], Filter::Or(alts) if alts.len() == 2));
    }
}
