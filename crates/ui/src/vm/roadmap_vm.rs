use sphere_core::model::{EnrolledRoadmap, Roadmap, RoadmapId, RoadmapProgress};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadmapCardVm {
    pub id: RoadmapId,
    pub title: String,
    pub role: String,
    pub topics_label: String,
    pub enrolled: bool,
    pub progress_label: Option<String>,
    pub progress_style: String,
}

/// Join the catalog with the learner's enrollments and progress.
#[must_use]
pub fn map_roadmap_cards(
    roadmaps: &[Roadmap],
    enrolled: &[EnrolledRoadmap],
    progress: &[RoadmapProgress],
) -> Vec<RoadmapCardVm> {
    roadmaps
        .iter()
        .map(|roadmap| {
            let is_enrolled = enrolled
                .iter()
                .any(|entry| entry.roadmap.id() == roadmap.id());
            // Progress percentages are already on a 0..=100 scale.
            let percent = progress
                .iter()
                .find(|entry| &entry.roadmap_id == roadmap.id())
                .map_or(0.0, |entry| entry.percentage)
                .round();
            RoadmapCardVm {
                id: roadmap.id().clone(),
                title: roadmap.title().to_string(),
                role: roadmap.role().to_string(),
                topics_label: match roadmap.topics().len() {
                    1 => "1 topic".to_string(),
                    n => format!("{n} topics"),
                },
                enrolled: is_enrolled,
                progress_label: is_enrolled.then(|| format!("{percent:.0}% complete")),
                progress_style: format!("width: {percent:.0}%"),
            }
        })
        .collect()
}
