use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Timestamps are kept at millisecond precision so they compare equal after
/// a round trip through any storage backend.
fn normalize(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Author of a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The author as rendered by the API, e.g. `"Ann Lee"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn validate(&self, errors: &mut Vec<String>) {
        if self.first_name.trim().is_empty() {
            errors.push("author.firstName must not be empty".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("author.lastName must not be empty".to_string());
        }
    }
}

/// The fields a caller supplies to create a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostData {
    pub author: Author,
    pub title: String,
    pub content: String,
    /// Defaults to the insertion time when absent.
    pub created: Option<DateTime<Utc>>,
}

impl BlogPostData {
    /// Check that every required field carries text.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        self.author.validate(&mut errors);
        if self.title.trim().is_empty() {
            errors.push("title must not be empty".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("content must not be empty".to_string());
        }
        into_result(errors)
    }
}

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a generated ID.
    pub fn create(data: BlogPostData) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: data.author,
            title: data.title,
            content: data.content,
            created: normalize(data.created.unwrap_or_else(Utc::now)),
        }
    }
}

/// A partial update: only the fields that are `Some` are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostChanges {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl BlogPostChanges {
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.title.is_none()
            && self.content.is_none()
            && self.created.is_none()
    }

    /// Check that no supplied field is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if let Some(author) = &self.author {
            author.validate(&mut errors);
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push("title must not be empty".to_string());
        }
        if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.push("content must not be empty".to_string());
        }
        into_result(errors)
    }

    /// Write the supplied fields onto `post`, leaving the rest untouched.
    pub fn apply(&self, post: &mut BlogPost) {
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(created) = self.created {
            post.created = normalize(created);
        }
    }
}

fn into_result(errors: Vec<String>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_data() -> BlogPostData {
        BlogPostData {
            author: Author::new("Ann", "Lee"),
            title: "T".to_string(),
            content: "C".to_string(),
            created: None,
        }
    }

    #[test]
    fn test_full_name_joins_with_space() {
        assert_eq!(Author::new("Ann", "Lee").full_name(), "Ann Lee");
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let a = BlogPost::create(sample_data());
        let b = BlogPost::create(sample_data());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_defaults_created_to_now() {
        let before = Utc::now() - Duration::seconds(1);
        let post = BlogPost::create(sample_data());
        assert!(post.created >= before);
        assert!(post.created <= Utc::now());
    }

    #[test]
    fn test_create_keeps_supplied_created_at_millisecond_precision() {
        let created = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap()
            + Duration::nanoseconds(123_456_789);
        let post = BlogPost::create(BlogPostData {
            created: Some(created),
            ..sample_data()
        });
        assert_eq!(post.created.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(post.created.timestamp(), created.timestamp());
    }

    #[test]
    fn test_validate_reports_every_blank_field() {
        let data = BlogPostData {
            author: Author::new(" ", "Lee"),
            title: String::new(),
            content: "C".to_string(),
            created: None,
        };
        let err = data.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("author.firstName"));
        assert!(msg.contains("title"));
        assert!(!msg.contains("content"));
    }

    #[test]
    fn test_apply_replaces_only_supplied_fields() {
        let mut post = BlogPost::create(sample_data());
        let original = post.clone();
        let changes = BlogPostChanges {
            author: Some(Author::new("Samantha", "Sassafras")),
            title: Some("Twelve Angry Data Types".to_string()),
            ..Default::default()
        };

        changes.apply(&mut post);

        assert_eq!(post.id, original.id);
        assert_eq!(post.author.full_name(), "Samantha Sassafras");
        assert_eq!(post.title, "Twelve Angry Data Types");
        assert_eq!(post.content, original.content);
        assert_eq!(post.created, original.created);
    }

    #[test]
    fn test_changes_emptiness_and_validation() {
        assert!(BlogPostChanges::default().is_empty());

        let blank_title = BlogPostChanges {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!blank_title.is_empty());
        assert!(blank_title.validate().is_err());
    }
}
