//! Searchlite Filter Parser
//!
//! Recursive-descent parser for the string filter syntax: comma-separated
//! top-level groups combined with AND, bracketed groups of comma-separated
//! alternatives combined with OR, and `field:value` equality tokens whose
//! values may be quoted.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::ast::{FilterExpr, FilterToken};
use searchlite_common::{Result, SearchliteError};
use std::iter::Peekable;
use std::str::Chars;

/// Parse a filter string into an expression tree.
///
/// `color:red,brand:nike` is an AND of two tokens;
/// `[color:red,color:blue],brand:nike` ANDs an OR-group with a token.
pub fn parse_filters(input: &str) -> Result<FilterExpr> {
    let mut parser = FilterParser::new(input);
    let groups = parser.parse_groups()?;
    match groups.len() {
        0 => Err(SearchliteError::Parse("empty filter expression".to_string())),
        1 => {
            // Safe to use expect here: we verified groups.len() == 1 above
            Ok(groups
                .into_iter()
                .next()
                .expect("groups verified to have exactly 1 element"))
        }
        _ => Ok(FilterExpr::AndList(groups)),
    }
}

/// Parse a single `field:value` token, splitting on the first `:`.
pub(crate) fn parse_token(raw: &str) -> Result<FilterToken> {
    let trimmed = raw.trim();
    match trimmed.split_once(':') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok(FilterToken::new(field.trim(), value.trim()))
        }
        _ => Err(SearchliteError::Parse(format!(
            "malformed filter token '{}': expected field:value",
            trimmed
        ))),
    }
}

// =============================================================================
// Parser
// =============================================================================

struct FilterParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> FilterParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    /// groups := group (',' group)*
    fn parse_groups(&mut self) -> Result<Vec<FilterExpr>> {
        let mut groups = Vec::new();
        loop {
            self.skip_whitespace();
            if self.chars.peek().is_none() {
                break;
            }

            let group = if self.chars.peek() == Some(&'[') {
                self.parse_or_group()?
            } else {
                FilterExpr::Token(self.parse_raw_token(&[','])?)
            };
            groups.push(group);

            self.skip_whitespace();
            match self.chars.next() {
                Some(',') => continue,
                None => break,
                Some(other) => {
                    return Err(SearchliteError::Parse(format!(
                        "expected ',' between filter groups, found '{}'",
                        other
                    )))
                }
            }
        }
        Ok(groups)
    }

    /// or_group := '[' token (',' token)* ']'
    fn parse_or_group(&mut self) -> Result<FilterExpr> {
        self.chars.next(); // consume '['
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            tokens.push(self.parse_raw_token(&[',', ']'])?);
            self.skip_whitespace();
            match self.chars.next() {
                Some(',') => continue,
                Some(']') => break,
                _ => {
                    return Err(SearchliteError::Parse(
                        "unterminated OR group: expected ']'".to_string(),
                    ))
                }
            }
        }
        Ok(FilterExpr::OrGroup(tokens))
    }

    /// token := field ':' value, where value may be quoted to protect
    /// separators.
    fn parse_raw_token(&mut self, stops: &[char]) -> Result<FilterToken> {
        let mut field = String::new();
        loop {
            match self.chars.peek() {
                Some(&':') => {
                    self.chars.next();
                    break;
                }
                Some(c) if stops.contains(c) => {
                    return Err(SearchliteError::Parse(format!(
                        "malformed filter token '{}': expected field:value",
                        field.trim()
                    )));
                }
                Some(_) => {
                    // Safe to use expect here: peek returned Some above
                    field.push(self.chars.next().expect("char verified present"));
                }
                None => {
                    return Err(SearchliteError::Parse(format!(
                        "malformed filter token '{}': expected field:value",
                        field.trim()
                    )));
                }
            }
        }

        let mut value = String::new();
        self.skip_whitespace();
        if matches!(self.chars.peek(), Some(&'"') | Some(&'\'')) {
            // Safe to use expect here: peek returned Some above
            let quote = self.chars.next().expect("quote verified present");
            for c in self.chars.by_ref() {
                if c == quote {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(c) = self.chars.peek() {
                if stops.contains(c) {
                    break;
                }
                // Safe to use expect here: peek returned Some above
                value.push(self.chars.next().expect("char verified present"));
            }
        }

        Ok(FilterToken::new(field.trim(), value.trim()))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
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
    fn test_single_token_compiles_to_quoted_equality() {
        let expr = parse_filters("color:red").unwrap();
        assert_eq!(expr, FilterExpr::Token(FilterToken::new("color", "red")));
        assert_eq!(expr.to_string(), "\"color\":\"red\"");
    }

    #[test]
    fn test_comma_separated_tokens_are_anded() {
        let expr = parse_filters("color:red,brand:nike").unwrap();
        assert_eq!(expr.to_string(), "\"color\":\"red\" AND \"brand\":\"nike\"");
    }

    #[test]
    fn test_bracketed_group_is_ored() {
        let expr = parse_filters("[color:red,color:blue],brand:nike").unwrap();
        assert_eq!(
            expr.to_string(),
            "(\"color\":\"red\" OR \"color\":\"blue\") AND \"brand\":\"nike\""
        );
    }

    #[test]
    fn test_quoted_value_protects_separators() {
        let expr = parse_filters("title:\"red, not blue\",brand:nike").unwrap();
        assert_eq!(
            expr.to_string(),
            "\"title\":\"red, not blue\" AND \"brand\":\"nike\""
        );
    }

    #[test]
    fn test_value_containing_colon_splits_on_first() {
        let expr = parse_filters("time:12:30").unwrap();
        assert_eq!(expr.to_string(), "\"time\":\"12:30\"");
    }

    #[test]
    fn test_preexisting_quotes_are_normalized() {
        let expr = parse_filters("color:\"red\"").unwrap();
        assert_eq!(expr.to_string(), "\"color\":\"red\"");
    }

    #[test]
    fn test_missing_separator_is_an_error() {
        let err = parse_filters("justaword").unwrap_err();
        assert!(matches!(err, SearchliteError::Parse(_)));

        let err = parse_filters("color:red,nope").unwrap_err();
        assert!(matches!(err, SearchliteError::Parse(_)));
    }

    #[test]
    fn test_unterminated_or_group_is_an_error() {
        let err = parse_filters("[color:red,color:blue").unwrap_err();
        assert!(matches!(err, SearchliteError::Parse(_)));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(parse_filters("").is_err());
        assert!(parse_filters("   ").is_err());
    }

    #[test]
    fn test_parse_token_splits_on_first_colon() {
        let token = parse_token("updated:2024:01").unwrap();
        assert_eq!(token.field, "updated");
        assert_eq!(token.value, "2024:01");

        assert!(parse_token("noseparator").is_err());
        assert!(parse_token(":value").is_err());
    }
}
