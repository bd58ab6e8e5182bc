use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::catalog::NamedRef;
use crate::model::ids::{CategoryId, CourseId, TagId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,
    #[error("course price cannot be negative")]
    NegativePrice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    #[serde(other)]
    Unspecified,
}

impl CourseLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
            CourseLevel::Unspecified => "-",
        }
    }
}

/// Instructor reference: populated object or plain name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum InstructorRecord {
    Name(String),
    Populated {
        #[serde(default)]
        name: String,
    },
}

fn instructor_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let record = Option::<InstructorRecord>::deserialize(deserializer)?;
    Ok(match record {
        Some(InstructorRecord::Name(name) | InstructorRecord::Populated { name }) => name,
        None => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub tags: Vec<NamedRef>,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default, alias = "published")]
    pub is_published: bool,
    #[serde(default, deserialize_with = "instructor_name")]
    pub instructor: String,
    #[serde(default, alias = "studentsCount")]
    pub enrolled_count: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map_or("Uncategorized", |category| {
                if category.name.is_empty() {
                    "Uncategorized"
                } else {
                    category.name.as_str()
                }
            })
    }
}

/// Validated body for creating or updating a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CategoryId>,
    tags: Vec<TagId>,
    level: CourseLevel,
    price: f64,
}

impl CourseDraft {
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is blank.
    pub fn new(title: &str, description: &str) -> Result<Self, CourseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
            category: None,
            tags: Vec::new(),
            level: CourseLevel::Beginner,
            price: 0.0,
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: CourseLevel) -> Self {
        self.level = level;
        self
    }

    /// # Errors
    ///
    /// Returns `CourseError::NegativePrice` for prices below zero.
    pub fn with_price(mut self, price: f64) -> Result<Self, CourseError> {
        if price < 0.0 {
            return Err(CourseError::NegativePrice);
        }
        self.price = price;
        Ok(self)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Listing filters sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
}

impl CourseFilter {
    #[must_use]
    pub fn search(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            search: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            category: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_fills_defaults() {
        let json = r#"{
            "_id": "c1",
            "title": "Rust 101",
            "instructor": {"name": "Ferris"},
            "level": "expert",
            "published": true
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.instructor, "Ferris");
        assert_eq!(course.level, CourseLevel::Unspecified);
        assert!(course.is_published);
        assert_eq!(course.category_name(), "Uncategorized");
        assert!(course.tags.is_empty());
    }

    #[test]
    fn course_accepts_plain_instructor_name() {
        let course: Course =
            serde_json::from_str(r#"{"_id":"c1","instructor":"Grace","category":{"_id":"k","name":"Web"}}"#)
                .unwrap();
        assert_eq!(course.instructor, "Grace");
        assert_eq!(course.category_name(), "Web");
    }

    #[test]
    fn draft_rejects_blank_title_and_negative_price() {
        assert_eq!(CourseDraft::new(" ", "").unwrap_err(), CourseError::EmptyTitle);
        let draft = CourseDraft::new("T", "").unwrap();
        assert_eq!(draft.with_price(-1.0).unwrap_err(), CourseError::NegativePrice);
    }

    #[test]
    fn draft_serializes_camel_case_without_empty_category() {
        let draft = CourseDraft::new("T", "d")
            .unwrap()
            .with_level(CourseLevel::Advanced);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["level"], "advanced");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn filter_ignores_blank_search() {
        assert_eq!(CourseFilter::search("  ").search, None);
        assert_eq!(CourseFilter::search(" rust ").search.as_deref(), Some("rust"));
    }
}
