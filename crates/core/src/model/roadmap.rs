use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::ids::{RoadmapId, TopicId};

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A single unit of learning content within a roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TopicRecord")]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    roadmap_id: Option<RoadmapId>,
    order: u32,
}

impl Topic {
    #[must_use]
    pub fn new(id: TopicId, title: impl Into<String>, roadmap_id: Option<RoadmapId>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            roadmap_id,
            order: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display; topics referenced only by id have no title.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled topic"
        } else {
            &self.title
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn roadmap_id(&self) -> Option<&RoadmapId> {
        self.roadmap_id.as_ref()
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }
}

/// Reference to a roadmap that the server sends either populated or as a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RoadmapRef {
    Id(RoadmapId),
    Populated {
        #[serde(rename = "_id")]
        id: RoadmapId,
    },
}

impl RoadmapRef {
    fn into_id(self) -> RoadmapId {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicRecord {
    #[serde(rename = "_id", alias = "id")]
    id: TopicId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    roadmap: Option<RoadmapRef>,
    #[serde(default)]
    order: u32,
}

impl From<TopicRecord> for Topic {
    fn from(record: TopicRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            roadmap_id: record.roadmap.map(RoadmapRef::into_id),
            order: record.order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TopicEntry {
    Id(TopicId),
    Populated(TopicRecord),
}

//
// ─── ROADMAP ───────────────────────────────────────────────────────────────────
//

/// A curated learning path containing ordered topics for a target role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RoadmapRecord")]
pub struct Roadmap {
    id: RoadmapId,
    title: String,
    role: String,
    description: String,
    topics: Vec<Topic>,
}

impl Roadmap {
    /// Build a roadmap; every topic is re-parented onto this roadmap.
    #[must_use]
    pub fn new(
        id: RoadmapId,
        title: impl Into<String>,
        role: impl Into<String>,
        topics: Vec<Topic>,
    ) -> Self {
        let topics = topics
            .into_iter()
            .map(|mut topic| {
                topic.roadmap_id = Some(id.clone());
                topic
            })
            .collect();
        Self {
            id,
            title: title.into(),
            role: role.into(),
            description: String::new(),
            topics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &RoadmapId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }

    #[must_use]
    pub fn contains_topic(&self, id: &TopicId) -> bool {
        self.topic(id).is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RoadmapRecord {
    #[serde(rename = "_id", alias = "id")]
    id: RoadmapId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    topics: Vec<TopicEntry>,
}

impl From<RoadmapRecord> for Roadmap {
    fn from(record: RoadmapRecord) -> Self {
        let mut topics: Vec<Topic> = record
            .topics
            .into_iter()
            .map(|entry| match entry {
                TopicEntry::Id(id) => Topic::new(id, String::new(), None),
                TopicEntry::Populated(record) => Topic::from(record),
            })
            .collect();
        topics.sort_by_key(Topic::order);

        let mut roadmap = Self::new(record.id, record.title, record.role, topics);
        roadmap.description = record.description;
        roadmap
    }
}

//
// ─── ENROLLMENT / PROGRESS ─────────────────────────────────────────────────────
//

/// One entry of the learner's enrolled roadmaps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledRoadmap {
    pub roadmap: Roadmap,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

/// Learner progress through a single roadmap.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProgressRecord")]
pub struct RoadmapProgress {
    pub roadmap_id: RoadmapId,
    pub completed_topics: Vec<TopicId>,
    pub percentage: f64,
}

impl RoadmapProgress {
    #[must_use]
    pub fn is_topic_complete(&self, id: &TopicId) -> bool {
        self.completed_topics.contains(id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRecord {
    roadmap: RoadmapRef,
    #[serde(default)]
    completed_topics: Vec<TopicEntry>,
    #[serde(default, alias = "progress")]
    percentage: f64,
}

impl From<ProgressRecord> for RoadmapProgress {
    fn from(record: ProgressRecord) -> Self {
        let completed_topics = record
            .completed_topics
            .into_iter()
            .map(|entry| match entry {
                TopicEntry::Id(id) => id,
                TopicEntry::Populated(record) => record.id,
            })
            .collect();
        Self {
            roadmap_id: record.roadmap.into_id(),
            completed_topics,
            percentage: record.percentage.clamp(0.0, 100.0),
        }
    }
}
