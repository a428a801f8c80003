//! Course material records.

use serde::Deserialize;

/// An uploaded course document. Created via upload, destroyed via delete;
/// never updated in place.
#[derive(Debug, Clone, Deserialize)]
pub struct Material {
    pub id: i64,
    pub title: String,
    /// Download URL served by the backend.
    pub file: String,
    #[serde(default)]
    pub uploaded_at: String,
}

impl Material {
    /// Date part of the upload timestamp for list display.
    pub fn uploaded_date(&self) -> &str {
        self.uploaded_at.split('T').next().unwrap_or(&self.uploaded_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_material() {
        let json = r#"{"id":4,"title":"Lecture 1","file":"/media/materials/lec1.pdf","uploaded_at":"2025-10-05T09:30:00Z"}"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.title, "Lecture 1");
        assert_eq!(material.uploaded_date(), "2025-10-05");
    }
}
