use sphere_core::model::{
    ActivityHeatmap, AdminStats, CareerReadiness, LearningStyle, PredictiveCompletion,
    RiskAssessment, RiskLevel,
};

use crate::vm::time_fmt::{format_day, format_optional_date, format_percent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessVm {
    pub score_label: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

impl From<&CareerReadiness> for ReadinessVm {
    fn from(readiness: &CareerReadiness) -> Self {
        Self {
            score_label: format_percent(readiness.score),
            strengths: readiness.strengths.clone(),
            gaps: readiness.gaps.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskVm {
    pub label: &'static str,
    pub class: &'static str,
    pub factors: Vec<String>,
}

impl From<&RiskAssessment> for RiskVm {
    fn from(risk: &RiskAssessment) -> Self {
        let class = match risk.level {
            RiskLevel::Low => "badge badge--ok",
            RiskLevel::Medium => "badge badge--warn",
            RiskLevel::High => "badge badge--danger",
            _ => "badge",
        };
        Self {
            label: risk.level.label(),
            class,
            factors: risk.factors.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleBarVm {
    pub name: String,
    pub share_label: String,
    pub width_style: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningStyleVm {
    pub dominant: String,
    pub bars: Vec<StyleBarVm>,
}

impl From<&LearningStyle> for LearningStyleVm {
    fn from(style: &LearningStyle) -> Self {
        let bars = style
            .ranked()
            .into_iter()
            .map(|(name, share)| {
                let label = format_percent(share);
                StyleBarVm {
                    name: name.to_string(),
                    width_style: format!("width: {label}"),
                    share_label: label,
                }
            })
            .collect();
        Self {
            dominant: if style.dominant.is_empty() {
                "Not enough activity yet".to_string()
            } else {
                style.dominant.clone()
            },
            bars,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub probability_label: String,
    pub projected_label: String,
    pub on_track_label: &'static str,
}

impl From<&PredictiveCompletion> for CompletionVm {
    fn from(prediction: &PredictiveCompletion) -> Self {
        Self {
            probability_label: format_percent(prediction.probability),
            projected_label: format_optional_date(prediction.projected_completion),
            on_track_label: if prediction.on_track {
                "On track"
            } else {
                "Behind schedule"
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatCellVm {
    pub title: String,
    pub class: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapVm {
    pub total_label: String,
    pub cells: Vec<HeatCellVm>,
}

impl From<&ActivityHeatmap> for HeatmapVm {
    fn from(heatmap: &ActivityHeatmap) -> Self {
        let cells = heatmap
            .days
            .iter()
            .map(|day| HeatCellVm {
                title: format!("{}: {}", format_day(day.date), day.count),
                class: format!("heat-cell heat-{}", heatmap.intensity(day.count)),
            })
            .collect();
        Self {
            total_label: format!("{} activities", heatmap.total()),
            cells,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTileVm {
    pub label: &'static str,
    pub value: String,
}

#[must_use]
pub fn map_admin_stats(stats: &AdminStats) -> Vec<StatTileVm> {
    vec![
        StatTileVm {
            label: "Users",
            value: stats.users.to_string(),
        },
        StatTileVm {
            label: "Active learners",
            value: stats.active_learners.to_string(),
        },
        StatTileVm {
            label: "Courses",
            value: stats.courses.to_string(),
        },
        StatTileVm {
            label: "Roadmaps",
            value: stats.roadmaps.to_string(),
        },
        StatTileVm {
            label: "Companies",
            value: stats.companies.to_string(),
        },
    ]
}
