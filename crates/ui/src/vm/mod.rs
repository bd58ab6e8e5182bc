mod admin_vm;
mod career_vm;
mod course_vm;
mod quiz_vm;
mod roadmap_vm;
mod time_fmt;

pub use admin_vm::{CompanyRowVm, RecruiterRowVm, UserRowVm, map_user_rows};
pub use career_vm::{
    CompletionVm, HeatCellVm, HeatmapVm, LearningStyleVm, ReadinessVm, RiskVm, StatTileVm,
    StyleBarVm, map_admin_stats,
};
pub use course_vm::{CourseRowVm, PaginationVm, map_course_rows, map_pagination};
pub use quiz_vm::{
    NavigatorItemVm, OptionVm, QuestionVm, QuizProgressVm, ResultVm, ReviewItemVm,
    SelectOptionVm, map_current_question, map_navigator, map_progress, map_review,
    map_roadmap_options, map_topic_options,
};
pub use roadmap_vm::{RoadmapCardVm, map_roadmap_cards};
pub use time_fmt::{format_date, format_day, format_optional_date, format_percent};
