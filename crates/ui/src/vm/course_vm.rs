use sphere_core::model::{Course, CourseId, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRowVm {
    pub id: CourseId,
    pub title: String,
    pub category: String,
    pub level: &'static str,
    pub instructor: String,
    pub enrolled_label: String,
    pub price_label: String,
    pub published: bool,
    pub status_label: &'static str,
}

impl From<&Course> for CourseRowVm {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            category: course.category_name().to_string(),
            level: course.level.label(),
            instructor: if course.instructor.is_empty() {
                "—".to_string()
            } else {
                course.instructor.clone()
            },
            enrolled_label: match course.enrolled_count {
                1 => "1 learner".to_string(),
                n => format!("{n} learners"),
            },
            price_label: if course.price <= 0.0 {
                "Free".to_string()
            } else {
                format!("${:.2}", course.price)
            },
            published: course.is_published,
            status_label: if course.is_published {
                "Published"
            } else {
                "Draft"
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationVm {
    pub label: String,
    pub has_previous: bool,
    pub has_next: bool,
}

#[must_use]
pub fn map_pagination<T>(page: &Page<T>) -> PaginationVm {
    PaginationVm {
        label: format!("Page {} of {}", page.page, page.pages.max(1)),
        has_previous: page.has_previous(),
        has_next: page.has_next(),
    }
}

#[must_use]
pub fn map_course_rows(courses: &[Course]) -> Vec<CourseRowVm> {
    courses.iter().map(CourseRowVm::from).collect()
}
