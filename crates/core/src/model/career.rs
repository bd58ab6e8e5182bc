use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReadiness {
    #[serde(default, alias = "readinessScore")]
    pub score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default, alias = "skillGaps")]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(default, alias = "riskLevel")]
    pub level: RiskLevel,
    #[serde(default, alias = "riskScore")]
    pub score: f64,
    #[serde(default)]
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStyle {
    #[serde(default, alias = "dominantStyle")]
    pub dominant: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

impl LearningStyle {
    /// Breakdown entries sorted by share, largest first.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .breakdown
            .iter()
            .map(|(style, share)| (style.as_str(), *share))
            .collect();
        entries.sort_by(|left, right| right.1.total_cmp(&left.1));
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveCompletion {
    #[serde(default, alias = "completionProbability")]
    pub probability: f64,
    #[serde(default, alias = "projectedCompletionDate")]
    pub projected_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub on_track: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ActivityHeatmap {
    #[serde(default)]
    pub days: Vec<HeatmapDay>,
}

impl ActivityHeatmap {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.days.iter().map(|day| day.count).sum()
    }

    #[must_use]
    pub fn busiest(&self) -> Option<&HeatmapDay> {
        self.days.iter().max_by_key(|day| day.count)
    }

    /// Intensity bucket 0-4 relative to the busiest day.
    #[must_use]
    pub fn intensity(&self, count: u32) -> u8 {
        let max = self.busiest().map_or(0, |day| day.count);
        if max == 0 || count == 0 {
            return 0;
        }
        let bucket = (u64::from(count) * 4).div_ceil(u64::from(max));
        u8::try_from(bucket.min(4)).unwrap_or(4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default, alias = "totalUsers")]
    pub users: u64,
    #[serde(default, alias = "totalCourses")]
    pub courses: u64,
    #[serde(default, alias = "totalRoadmaps")]
    pub roadmaps: u64,
    #[serde(default, alias = "totalCompanies")]
    pub companies: u64,
    #[serde(default)]
    pub active_learners: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_tolerates_unknown_values() {
        let risk: RiskAssessment =
            serde_json::from_str(r#"{"riskLevel":"critical","score":0.9}"#).unwrap();
        assert_eq!(risk.level, RiskLevel::Unknown);
        let risk: RiskAssessment = serde_json::from_str(r#"{"level":"high"}"#).unwrap();
        assert_eq!(risk.level.label(), "High");
    }

    #[test]
    fn learning_style_ranks_by_share() {
        let style: LearningStyle = serde_json::from_str(
            r#"{"dominant":"visual","breakdown":{"auditory":20,"visual":55,"kinesthetic":25}}"#,
        )
        .unwrap();
        let ranked = style.ranked();
        assert_eq!(ranked[0].0, "visual");
        assert_eq!(ranked[2].0, "auditory");
    }

    #[test]
    fn heatmap_intensity_buckets() {
        let heatmap: ActivityHeatmap = serde_json::from_str(
            r#"{"days":[{"date":"2024-01-01","count":8},{"date":"2024-01-02","count":1},{"date":"2024-01-03"}]}"#,
        )
        .unwrap();
        assert_eq!(heatmap.total(), 9);
        assert_eq!(heatmap.intensity(8), 4);
        assert_eq!(heatmap.intensity(1), 1);
        assert_eq!(heatmap.intensity(0), 0);
    }
}
