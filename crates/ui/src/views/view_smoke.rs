use std::time::Duration;

use dioxus::prelude::{ReadableExt, WritableExt};
use services::{QuizPhase, SubmitReason};
use sphere_core::model::{RoadmapId, TopicId, UserRole};

use super::test_harness::{StubApi, ViewHarness, ViewKind, setup_view_harness};

const ENROLLED: &str = r#"{"success":true,"data":[{"roadmap":{"_id":"r1","title":"Backend","role":"Engineer","topics":[{"_id":"t1","title":"HTTP","order":1},{"_id":"t2","title":"Caching","order":2}]}}]}"#;

const GENERATED: &str = r#"{"success":true,"data":{"questions":[
    {"questionText":"What does HTTP stand for?","options":["Hypertext Transfer Protocol","High Traffic Port"],"correctAnswer":0,"explanation":"It is the web's transfer protocol."},
    {"questionText":"Which status means Not Found?","options":["200","404"],"correctAnswer":"404"}
]}}"#;

fn career_routes(stub: &StubApi) {
    stub.route(
        "GET /career/readiness",
        200,
        r#"{"success":true,"data":{"readinessScore":72,"strengths":["APIs"],"skillGaps":["Testing"]}}"#,
    );
    stub.route(
        "GET /career/risk",
        200,
        r#"{"success":true,"data":{"riskLevel":"low","riskScore":12,"factors":[]}}"#,
    );
    stub.route(
        "GET /career/learning-style",
        200,
        r#"{"success":true,"data":{"dominantStyle":"visual","breakdown":{"visual":0.6,"reading":0.4}}}"#,
    );
    stub.route(
        "GET /career/predictive-completion",
        200,
        r#"{"success":true,"data":{"completionProbability":0.8,"onTrack":true}}"#,
    );
}

fn tutor_routes(stub: &StubApi) {
    stub.route("GET /roadmaps/my-enrolled", 200, ENROLLED);
    stub.route("POST /ai/tutor/generate-test", 200, GENERATED);
}

/// Pick roadmap `r1` / topic `t1` and start a quiz.
async fn start_quiz(harness: &mut ViewHarness) -> String {
    harness.settle_until("Generate a practice test").await;
    let handles = harness.tutor_handles.get();
    harness.dom.in_runtime(|| {
        let mut session = handles.session;
        let mut session = session.write();
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
    });
    harness.dom.in_runtime(|| handles.start.call(false));
    harness.settle_until("Question 1 of 2").await
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_widgets_and_degrades_failed_ones() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(UserRole::Student), |stub| {
        career_routes(stub);
        stub.route(
            "GET /career/heatmap",
            500,
            r#"{"success":false,"message":"Heatmap offline"}"#,
        );
    })
    .await;

    let html = harness.settle_until("Career readiness").await;

    assert!(html.contains("Welcome back, Ada"), "{html}");
    assert!(html.contains("72%"), "{html}");
    assert!(html.contains("Testing"), "{html}");
    assert!(html.contains("Low"), "{html}");
    assert!(html.contains("On track"), "{html}");
    assert!(html.contains("Not available right now."), "{html}");
    // Students never see the admin tiles.
    assert!(harness.stub.request_to("GET /admin/stats").is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_admin_stats_for_admins() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Some(UserRole::Admin), |stub| {
        career_routes(stub);
        stub.route(
            "GET /admin/stats",
            200,
            r#"{"success":true,"data":{"totalUsers":41,"totalCourses":7}}"#,
        );
    })
    .await;

    let html = harness.settle_until("Active learners").await;

    assert!(html.contains("41"), "{html}");
    assert!(html.contains("Users"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn roadmaps_show_enrollment_state() {
    let mut harness = setup_view_harness(ViewKind::Roadmaps, Some(UserRole::Student), |stub| {
        stub.route(
            "GET /roadmaps",
            200,
            r#"{"success":true,"data":[
                {"_id":"r1","title":"Backend","role":"Engineer","topics":["t1","t2"]},
                {"_id":"r2","title":"Frontend","role":"Engineer","topics":["t3"]}
            ]}"#,
        );
        stub.route("GET /roadmaps/my-enrolled", 200, ENROLLED);
        stub.route(
            "GET /roadmaps/progress",
            200,
            r#"{"success":true,"data":[{"roadmap":"r1","completedTopics":["t1"],"percentage":50}]}"#,
        );
    })
    .await;

    let html = harness.settle_until("Frontend").await;

    assert!(html.contains("50% complete"), "{html}");
    assert!(html.contains("Enroll"), "{html}");
    assert!(html.contains("1 topic"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutor_without_enrollments_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        stub.route("GET /roadmaps/my-enrolled", 200, r#"{"success":true,"data":[]}"#);
    })
    .await;

    let html = harness
        .settle_until("Enroll in a roadmap to generate practice tests.")
        .await;

    assert!(!html.contains("Start Quiz"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutor_setup_lists_enrolled_roadmaps() {
    let mut harness =
        setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), tutor_routes).await;

    let html = harness.settle_until("Generate a practice test").await;

    assert!(html.contains("Backend"), "{html}");
    assert!(html.contains("Select a topic"), "{html}");
    assert!(html.contains("Start Quiz"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tutor_start_without_topic_reports_inline() {
    let mut harness =
        setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), tutor_routes).await;
    harness.settle_until("Generate a practice test").await;
    let handles = harness.tutor_handles.get();

    harness.dom.in_runtime(|| handles.start.call(false));
    let html = harness.settle_until("select a topic before starting the quiz").await;

    assert!(html.contains("Generate a practice test"), "{html}");
    assert!(harness.stub.request_to("POST /ai/tutor/generate-test").is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn tutor_runs_a_quiz_through_to_results() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        tutor_routes(stub);
        stub.route(
            "POST /ai/tutor/evaluate",
            200,
            r#"{"success":true,"data":{"score":50,"correct":1,"total":2}}"#,
        );
    })
    .await;

    let html = start_quiz(&mut harness).await;
    assert!(html.contains("What does HTTP stand for?"), "{html}");
    assert!(html.contains("0 of 2 answered"), "{html}");
    let generate = harness
        .stub
        .request_to("POST /ai/tutor/generate-test")
        .unwrap();
    assert!(generate.body.contains(r#""topicId":"t1""#), "{}", generate.body);

    let handles = harness.tutor_handles.get();
    harness.dom.in_runtime(|| {
        let mut session = handles.session;
        session.write().select_answer(0, 0).unwrap();
    });
    harness.settle_until("1 of 2 answered").await;

    harness
        .dom
        .in_runtime(|| handles.submit.call(SubmitReason::Manual));
    let html = harness.settle_until("1 of 2 correct").await;

    assert!(html.contains("50%"), "{html}");
    assert!(html.contains("Retry Same Topic"), "{html}");
    assert!(html.contains("Your answer: Not answered"), "{html}");
    assert!(html.contains("Correct answer: 404"), "{html}");
    let evaluate = harness.stub.request_to("POST /ai/tutor/evaluate").unwrap();
    assert!(evaluate.body.contains(r#""answers":[0,null]"#), "{}", evaluate.body);

    harness.dom.in_runtime(|| handles.new_quiz.call(()));
    let html = harness.settle_until("Generate a practice test").await;
    assert!(html.contains("Backend"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_evaluation_keeps_quiz_open() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        tutor_routes(stub);
        stub.route(
            "POST /ai/tutor/evaluate",
            200,
            r#"{"success":false,"message":"Grading is unavailable"}"#,
        );
    })
    .await;
    start_quiz(&mut harness).await;
    let handles = harness.tutor_handles.get();

    harness
        .dom
        .in_runtime(|| handles.submit.call(SubmitReason::Manual));
    let html = harness.settle_until("Grading is unavailable").await;

    assert!(html.contains("Question 1 of 2"), "{html}");
    assert!(html.contains("Submit Quiz") || html.contains("Submit"), "{html}");
    let phase = harness.dom.in_runtime(|| handles.session.read().phase());
    assert_eq!(phase, QuizPhase::Quiz);
}

/// Start a one-question quiz, whose countdown runs 60 ticks of `tick`.
async fn start_fast_quiz(harness: &mut ViewHarness, tick: Duration) {
    harness.tutor_handles.set_tick(tick);
    harness.settle_until("Generate a practice test").await;
    let handles = harness.tutor_handles.get();
    harness.dom.in_runtime(|| {
        let mut session = handles.session;
        session.write().set_question_count(1).unwrap();
    });
    start_quiz(harness).await;
}

#[tokio::test(flavor = "current_thread")]
async fn countdown_expiry_submits_exactly_once() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        tutor_routes(stub);
        stub.route(
            "POST /ai/tutor/evaluate",
            200,
            r#"{"success":true,"data":{"score":0,"correct":0,"total":2}}"#,
        );
    })
    .await;
    start_fast_quiz(&mut harness, Duration::from_millis(1)).await;

    let html = harness
        .settle_within("0 of 2 correct", Duration::from_secs(5))
        .await;
    assert!(html.contains("Retry Same Topic"), "{html}");

    harness.drive_for(Duration::from_millis(200)).await;
    assert_eq!(harness.stub.count_requests_to("POST /ai/tutor/evaluate"), 1);
    let handles = harness.tutor_handles.get();
    let phase = harness.dom.in_runtime(|| handles.session.read().phase());
    assert_eq!(phase, QuizPhase::Results);
}

#[tokio::test(flavor = "current_thread")]
async fn manual_submit_stops_the_countdown() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        tutor_routes(stub);
        stub.route(
            "POST /ai/tutor/evaluate",
            200,
            r#"{"success":true,"data":{"score":50,"correct":1,"total":2}}"#,
        );
    })
    .await;
    start_fast_quiz(&mut harness, Duration::from_millis(5)).await;
    let handles = harness.tutor_handles.get();

    harness
        .dom
        .in_runtime(|| handles.submit.call(SubmitReason::Manual));
    harness
        .settle_within("1 of 2 correct", Duration::from_secs(5))
        .await;

    // Outlive the whole countdown; a leftover timer would submit again.
    harness.drive_for(Duration::from_millis(600)).await;
    assert_eq!(harness.stub.count_requests_to("POST /ai/tutor/evaluate"), 1);
    let html = harness.render();
    assert!(html.contains("1 of 2 correct"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generation_failure_returns_to_setup() {
    let mut harness = setup_view_harness(ViewKind::Tutor, Some(UserRole::Student), |stub| {
        stub.route("GET /roadmaps/my-enrolled", 200, ENROLLED);
        stub.route(
            "POST /ai/tutor/generate-test",
            200,
            r#"{"success":true,"data":{"questions":[]}}"#,
        );
    })
    .await;
    harness.settle_until("Generate a practice test").await;
    let handles = harness.tutor_handles.get();
    harness.dom.in_runtime(|| {
        let mut session = handles.session;
        let mut session = session.write();
        session.select_roadmap(Some(RoadmapId::new("r1"))).unwrap();
        session.select_topic(Some(TopicId::new("t1"))).unwrap();
    });

    harness.dom.in_runtime(|| handles.start.call(false));
    harness.drive_async().await;
    let html = harness.settle_until("Start Quiz").await;

    assert!(!html.contains("Generating questions..."), "{html}");
    let phase = harness.dom.in_runtime(|| handles.session.read().phase());
    assert_eq!(phase, QuizPhase::Setup);
}

#[tokio::test(flavor = "current_thread")]
async fn courses_error_offers_retry() {
    let mut harness = setup_view_harness(ViewKind::Courses, Some(UserRole::Admin), |stub| {
        stub.route(
            "GET /courses",
            500,
            r#"{"success":false,"message":"Database offline"}"#,
        );
        stub.route("GET /categories", 200, r#"{"success":true,"data":[]}"#);
    })
    .await;

    let html = harness.settle_until("Database offline").await;

    assert!(html.contains("Retry"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_render_table_rows() {
    let mut harness = setup_view_harness(ViewKind::Courses, Some(UserRole::Admin), |stub| {
        stub.route(
            "GET /courses",
            200,
            r#"{"success":true,"data":{"courses":[{"_id":"c1","title":"Rust Basics","level":"beginner","isPublished":false}],"page":1,"totalPages":1,"total":1}}"#,
        );
        stub.route(
            "GET /categories",
            200,
            r#"{"success":true,"data":[{"_id":"k1","name":"Programming"}]}"#,
        );
    })
    .await;

    let html = harness.settle_until("Rust Basics").await;

    assert!(html.contains("Uncategorized"), "{html}");
    assert!(html.contains("Publish"), "{html}");
    assert!(html.contains("Programming"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_marks_route_public() {
    let mut harness = setup_view_harness(ViewKind::Login, None, |_| {}).await;

    let html = harness.settle_until("Sign in").await;

    assert!(html.contains("Create an account"), "{html}");
    assert!(harness.session.is_public_route());
}

#[tokio::test(flavor = "current_thread")]
async fn tags_list_renders_chips() {
    let mut harness = setup_view_harness(ViewKind::Tags, Some(UserRole::Admin), |stub| {
        stub.route(
            "GET /tags",
            200,
            r#"{"success":true,"data":[{"_id":"g1","name":"async"},{"_id":"g2","name":"web"}]}"#,
        );
    })
    .await;

    let html = harness.settle_until("async").await;

    assert!(html.contains("web"), "{html}");
}
