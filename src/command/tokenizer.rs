//! Line tokenizer
//!
//! Runs of spaces separate tokens. A double-quoted segment is copied verbatim
//! (spaces included, quotes dropped) and joins whatever text touches it, so
//! `-name="Two Words"` is the single token `-name=Two Words`.

use crate::error::{BookstoreError, BookstoreResult};

/// Split a command line into tokens
pub fn tokenize(line: &str) -> BookstoreResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quote = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quote = !in_quote;
                in_token = true;
            }
            ' ' if !in_quote => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quote {
        return Err(BookstoreError::syntax("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_separate_tokens() {
        assert_eq!(
            tokenize("  su   root  sjtu ").unwrap(),
            vec!["su", "root", "sjtu"]
        );
    }

    #[test]
    fn test_blank_line_has_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("     ").unwrap().is_empty());
    }

    #[test]
    fn test_quoted_segment_is_one_token() {
        assert_eq!(
            tokenize("register u1 pw \"Jane Doe\"").unwrap(),
            vec!["register", "u1", "pw", "Jane Doe"]
        );
    }

    #[test]
    fn test_quote_glues_to_option_key() {
        assert_eq!(
            tokenize("modify -name=\"The  Book\" -price=9.99").unwrap(),
            vec!["modify", "-name=The  Book", "-price=9.99"]
        );
    }

    #[test]
    fn test_empty_quotes_make_empty_token() {
        assert_eq!(tokenize("show \"\"").unwrap(), vec!["show", ""]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(tokenize("a\tb").unwrap(), vec!["a\tb"]);
    }

    #[test]
    fn test_unterminated_quote_rejected() {
        assert!(matches!(
            tokenize("modify -name=\"oops"),
            Err(BookstoreError::Syntax(_))
        ));
    }
}
