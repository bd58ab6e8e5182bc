use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// Server ids are opaque document keys (`_id`), so every id wraps a non-empty string.
macro_rules! server_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id from its server representation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

server_id!(
    /// Unique identifier for a Roadmap
    RoadmapId
);
server_id!(
    /// Unique identifier for a Topic
    TopicId
);
server_id!(
    /// Unique identifier for a User
    UserId
);
server_id!(
    /// Unique identifier for a Course
    CourseId
);
server_id!(
    /// Unique identifier for a Category
    CategoryId
);
server_id!(
    /// Unique identifier for a Tag
    TagId
);
server_id!(
    /// Unique identifier for a Company
    CompanyId
);
server_id!(
    /// Unique identifier for a Recruiter
    RecruiterId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────
