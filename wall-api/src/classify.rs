//! Keyword-scoring submission classifier.
//!
//! Each category owns a fixed keyword set; every whitespace token of the
//! lowercased text scores a point for each category whose set contains it.
//! The strictly highest score wins. Ties fall back to declaration order of
//! [`KEYWORD_MAP`], which keeps the result deterministic and testable. Text
//! with no keyword hits at all defaults to `Feedback`.

use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub enum Category {
    Suggestion,
    Inquiry,
    Request,
    Feedback,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Suggestion => "Suggestion",
            Category::Inquiry => "Inquiry",
            Category::Request => "Request",
            Category::Feedback => "Feedback",
        }
    }
}

/// Category → keyword tokens. Declaration order is the tie-break order.
pub const KEYWORD_MAP: &[(Category, &[&str])] = &[
    (
        Category::Suggestion,
        &["suggest", "recommend", "should", "improvement", "enhance"],
    ),
    (
        Category::Inquiry,
        &["question", "why", "how", "what", "when", "where"],
    ),
    (
        Category::Request,
        &["need", "want", "please", "request", "require"],
    ),
    (
        Category::Feedback,
        &["think", "feel", "experience", "opinion", "good", "bad", "excellent"],
    ),
];

/// Assigns a category to `text`. Total: always returns a label.
pub fn classify(text: &str) -> Category {
    let text = text.to_lowercase();
    let mut scores = [0u32; KEYWORD_MAP.len()];

    for token in text.split_whitespace() {
        for (i, (_, keywords)) in KEYWORD_MAP.iter().enumerate() {
            if keywords.contains(&token) {
                scores[i] += 1;
            }
        }
    }

    if scores.iter().all(|&s| s == 0) {
        return Category::Feedback;
    }

    // Strictly-greater comparison keeps the first of equal maxima, i.e.
    // declaration order.
    let mut best = Category::Feedback;
    let mut best_score = 0;
    for ((category, _), &score) in KEYWORD_MAP.iter().zip(scores.iter()) {
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_keywords() {
        assert_eq!(classify("should we improve this"), Category::Suggestion);
        assert_eq!(classify("I suggest a new layout"), Category::Suggestion);
    }

    #[test]
    fn test_inquiry_keywords() {
        assert_eq!(classify("why is this broken"), Category::Inquiry);
        assert_eq!(classify("how does this work"), Category::Inquiry);
    }

    #[test]
    fn test_request_keywords() {
        assert_eq!(
            classify("please add a dark mode option"),
            Category::Request
        );
    }

    #[test]
    fn test_defaults_to_feedback() {
        assert_eq!(classify("xyz qqq"), Category::Feedback);
        assert_eq!(classify(""), Category::Feedback);
    }

    #[test]
    fn test_is_deterministic() {
        let text = "please tell me why I should feel good about this";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_tie_breaks_by_declaration_order() {
        // One Suggestion hit and one Inquiry hit: Suggestion is declared
        // first and must win.
        assert_eq!(classify("should what"), Category::Suggestion);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("PLEASE HELP"), Category::Request);
    }

    #[test]
    fn test_token_may_score_multiple_categories() {
        // "why why" outscores a single Suggestion hit.
        assert_eq!(classify("should why why"), Category::Inquiry);
    }
}
