//! Token splicing into the original statement text.

use super::token::SqlToken;
use crate::error::Error;

/// Apply rewrite tokens to the original SQL text.
///
/// Tokens are walked in ascending start order. A token with a stop index
/// replaces the inclusive `[start, stop]` span; a token without one
/// inserts at `start`. Overlapping tokens and spans beyond the statement
/// text are programmer errors upstream and fail fast here.
pub fn splice(sql: &str, tokens: &[&dyn SqlToken]) -> Result<String, Error> {
    let mut ordered: Vec<&dyn SqlToken> = tokens.to_vec();
    ordered.sort_by_key(|token| token.start_index());

    let mut result = String::with_capacity(sql.len());
    let mut cursor = 0;

    for token in ordered {
        let start = token.start_index();
        if start < cursor {
            return Err(Error::TokenOverlap(start));
        }

        match token.stop_index() {
            Some(stop) => {
                if stop < start || stop >= sql.len() {
                    return Err(Error::TokenOutOfBounds {
                        start,
                        stop,
                        len: sql.len(),
                    });
                }
                result.push_str(&sql[cursor..start]);
                result.push_str(&token.to_string());
                cursor = stop + 1;
            }
            None => {
                if start > sql.len() {
                    return Err(Error::TokenOutOfBounds {
                        start,
                        stop: start,
                        len: sql.len(),
                    });
                }
                result.push_str(&sql[cursor..start]);
                result.push_str(&token.to_string());
                cursor = start;
            }
        }
    }

    result.push_str(&sql[cursor..]);
    Ok(result)
}
