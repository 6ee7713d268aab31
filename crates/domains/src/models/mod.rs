//! # Domain Models
//!
//! These structs represent the entities the admin client works with.
//! Field names follow the remote GraphQL schema through serde renames so the
//! same types serve as wire payloads and in-memory state.

mod article;
mod filter;
mod graphql;
mod layout;
mod notification;
mod sort;
mod user;

pub use article::*;
pub use filter::*;
pub use graphql::*;
pub use layout::*;
pub use notification::*;
pub use sort::*;
pub use user::*;

/// True when `text` is empty or consists only of whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Splits a `;`-separated tag list, dropping blank entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(';')
        .filter(|tag| !is_blank(tag))
        .map(|tag| tag.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detects_whitespace_only() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn tags_split_on_semicolon_and_skip_blanks() {
        assert_eq!(parse_tags("rust; async;; ;web"), vec!["rust", "async", "web"]);
        assert!(parse_tags("  ;  ").is_empty());
    }
}
