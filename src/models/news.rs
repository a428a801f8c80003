//! Public news/announcement records.

use serde::Deserialize;

/// One announcement from `GET /news/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

impl NewsItem {
    /// First `limit` characters of the body for card previews.
    pub fn preview(&self, limit: usize) -> String {
        if self.content.chars().count() <= limit {
            self.content.clone()
        } else {
            let cut: String = self.content.chars().take(limit).collect();
            format!("{cut}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_content_unchanged() {
        let item = NewsItem {
            id: 1,
            title: "Exam week".to_string(),
            content: "Starts Monday.".to_string(),
            created_at: String::new(),
        };
        assert_eq!(item.preview(100), "Starts Monday.");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let item = NewsItem {
            id: 1,
            title: "t".to_string(),
            content: "x".repeat(300),
            created_at: String::new(),
        };
        let preview = item.preview(100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }
}
