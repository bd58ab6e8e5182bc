use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AdminService, ApiConfig, AppServices, AuthService, AuthSession, CareerService,
    CatalogService, CourseService, QuizLoopService, RoadmapService, TutorService,
};
use sphere_core::model::{AuthUser, UserId, UserRole};
use sphere_core::time::fixed_clock;
use storage::repository::Storage;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::context::{UiApp, build_app_context};
use crate::views::tutor::TutorTestHandles;
use crate::views::{
    CategoriesView, CompaniesView, CoursesView, DashboardView, LoginView, RoadmapsView,
    TagsView, ToastHost, TutorView, UsersView, use_toaster_provider,
};

//
// ─── STUB API ──────────────────────────────────────────────────────────────────
//

/// One request seen by the stub: `"POST /api/ai/tutor/evaluate"` plus its body.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub line: String,
    pub body: String,
}

type Routes = Arc<Mutex<HashMap<String, (u16, String)>>>;

/// Path-routed JSON responder. Unknown routes answer 404 with an envelope.
#[derive(Clone)]
pub struct StubApi {
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubApi {
    /// Answer `"METHOD /path"` (query string ignored, `/api` prefix implied).
    pub fn route(&self, key: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(key.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_to(&self, key: &str) -> Option<RecordedRequest> {
        let (method, path) = key.split_once(' ').unwrap();
        let prefix = format!("{method} /api{path}");
        self.requests()
            .into_iter()
            .rev()
            .find(|request| request.line.starts_with(&prefix))
    }

    pub fn count_requests_to(&self, key: &str) -> usize {
        let (method, path) = key.split_once(' ').unwrap();
        let prefix = format!("{method} /api{path}");
        self.requests()
            .iter()
            .filter(|request| request.line.starts_with(&prefix))
            .count()
    }
}

async fn serve_stub() -> (ApiConfig, StubApi) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stub = StubApi {
        routes: Arc::default(),
        requests: Arc::default(),
    };
    let server = stub.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let server = server.clone();
            tokio::spawn(async move { answer(stream, &server).await });
        }
    });
    (ApiConfig::new(format!("http://{addr}/api")), stub)
}

async fn answer(mut stream: TcpStream, stub: &StubApi) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];
    let (head, body) = loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).into_owned();
        let Some(head_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..head_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + content_length {
            break (text[..head_end].to_string(), text[head_end + 4..].to_string());
        }
    };

    let line = head.lines().next().unwrap_or_default().to_string();
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default();
    let key = format!("{method} {}", path.trim_start_matches("/api"));
    stub.requests
        .lock()
        .unwrap()
        .push(RecordedRequest { line, body });

    let (status, payload) = stub
        .routes
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or_else(|| (404, r#"{"success":false,"message":"Not found"}"#.to_string()));
    let response = format!(
        "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

//
// ─── APP ───────────────────────────────────────────────────────────────────────
//

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<AuthSession> {
        self.services.session()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn roadmaps(&self) -> Arc<RoadmapService> {
        self.services.roadmaps()
    }

    fn tutor(&self) -> Arc<TutorService> {
        self.services.tutor()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn career(&self) -> Arc<CareerService> {
        self.services.career()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Dashboard,
    Roadmaps,
    Tutor,
    Courses,
    Categories,
    Tags,
    Users,
    Companies,
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    tutor_handles: TutorTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.tutor_handles.clone());
    use_toaster_provider();
    rsx! {
        Router::<TestRoute> {}
        ToastHost {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Roadmaps => rsx! { RoadmapsView {} },
        ViewKind::Tutor => rsx! { TutorView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Categories => rsx! { CategoriesView {} },
        ViewKind::Tags => rsx! { TagsView {} },
        ViewKind::Users => rsx! { UsersView {} },
        ViewKind::Companies => rsx! { CompaniesView {} },
    }
}

//
// ─── HARNESS ───────────────────────────────────────────────────────────────────
//

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub stub: StubApi,
    pub session: Arc<AuthSession>,
    pub tutor_handles: TutorTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending work until the rendered HTML contains `needle`.
    pub async fn settle_until(&mut self, needle: &str) -> String {
        for _ in 0..60 {
            self.drive_async().await;
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
        }
        let html = self.render();
        panic!("never rendered {needle:?}; last html: {html}");
    }

    /// Like `settle_until`, bounded by elapsed time instead of render passes.
    /// Fast countdown ticks wake the dom far more often than the pass limit.
    pub async fn settle_within(&mut self, needle: &str, limit: Duration) -> String {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
        }
        let html = self.render();
        panic!("never rendered {needle:?} within {limit:?}; last html: {html}");
    }

    /// Keep driving the dom for `span`, whatever it renders.
    pub async fn drive_for(&mut self, span: Duration) {
        let deadline = tokio::time::Instant::now() + span;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn user(role: UserRole) -> AuthUser {
    AuthUser {
        id: UserId::new("u1"),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        role,
    }
}

/// Build the view against a fresh stub. `configure` installs routes before the
/// first render so on-mount loads see them.
pub async fn setup_view_harness(
    view: ViewKind,
    signed_in_as: Option<UserRole>,
    configure: impl FnOnce(&StubApi),
) -> ViewHarness {
    let (config, stub) = serve_stub().await;
    configure(&stub);

    let services = AppServices::new(config, &Storage::in_memory(), fixed_clock())
        .expect("build services");
    let session = services.session();
    if let Some(role) = signed_in_as {
        session.sign_in("test-token", user(role)).await.expect("sign in");
    }

    let tutor_handles = TutorTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        HarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            tutor_handles: tutor_handles.clone(),
        },
    );
    let mut harness = ViewHarness {
        dom,
        stub,
        session,
        tutor_handles,
    };
    harness.rebuild();
    harness
}
