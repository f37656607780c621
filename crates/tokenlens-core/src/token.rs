#![forbid(unsafe_code)]

//! Tokenization and the token budget.
//!
//! Tokens are whitespace-separated fields of the input text: any run of
//! Unicode whitespace is a separator and empty fields are never produced.
//! The scoring service and the visualization index tokens the same way, so
//! this is the single source of truth for splitting.

/// Maximum number of tokens accepted for scoring or saving.
pub const TOKEN_BUDGET: usize = 100;

/// Split text into tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Number of tokens in the text without allocating the token list.
#[must_use]
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Validate the text against the token budget.
///
/// Returns the token count, or an error when the text is empty or exceeds
/// [`TOKEN_BUDGET`]. Both cases block scoring and saving before any network
/// round trip is made.
pub fn check_budget(text: &str) -> Result<usize, BudgetError> {
    let count = token_count(text);
    if count == 0 {
        return Err(BudgetError::Empty);
    }
    if count > TOKEN_BUDGET {
        return Err(BudgetError::Exceeded { count });
    }
    Ok(count)
}

/// Why a text was rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetError {
    /// The text contains no tokens.
    Empty,
    /// The text contains more than [`TOKEN_BUDGET`] tokens.
    Exceeded {
        /// Observed token count.
        count: usize,
    },
}

impl std::fmt::Display for BudgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "text contains no tokens"),
            Self::Exceeded { count } => {
                write!(f, "text has {count} tokens, budget is {TOKEN_BUDGET}")
            }
        }
    }
}

impl std::error::Error for BudgetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(tokenize("The  cat\tsat\n"), vec!["The", "cat", "sat"]);
    }

    #[test]
    fn empty_and_blank_produce_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn count_matches_tokenize() {
        let text = "a b  c   d";
        assert_eq!(token_count(text), tokenize(text).len());
    }

    #[test]
    fn budget_rejects_empty() {
        assert_eq!(check_budget("   "), Err(BudgetError::Empty));
    }

    #[test]
    fn budget_accepts_up_to_limit() {
        let text = vec!["x"; TOKEN_BUDGET].join(" ");
        assert_eq!(check_budget(&text), Ok(TOKEN_BUDGET));
    }

    #[test]
    fn budget_rejects_over_limit() {
        let text = vec!["x"; TOKEN_BUDGET + 1].join(" ");
        assert_eq!(
            check_budget(&text),
            Err(BudgetError::Exceeded {
                count: TOKEN_BUDGET + 1
            })
        );
    }
}
