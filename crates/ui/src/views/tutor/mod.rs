mod results;
mod runner;
mod setup;

use std::sync::Arc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use log::info;
use services::{
    QuizLoopService, QuizPhase, QuizSession, SubmitOutcome, SubmitReason, TickOutcome,
};

use crate::context::AppContext;
use crate::views::{
    ErrorPanel, LoadingPanel, MountGuard, Toaster, ViewError, ViewState, use_mount_guard,
    use_toaster, view_state_from_resource,
};

use results::ResultsPanel;
use runner::QuizPanel;
use setup::SetupPanel;

#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Everything the start, countdown, and submit paths share. All fields are
/// handles, so copies observe the same state.
#[derive(Clone)]
struct QuizController {
    session: Signal<QuizSession>,
    countdown: Signal<Option<Task>>,
    inline_error: Signal<Option<ViewError>>,
    quiz_loop: Arc<QuizLoopService>,
    toaster: Toaster,
    guard: MountGuard,
    #[cfg(test)]
    tick_override: Rc<Cell<Option<Duration>>>,
}

impl QuizController {
    /// Claim a start (fresh or retry), generate questions, and enter the quiz.
    fn start(&self, retry: bool) {
        let mut session = self.session;
        let mut inline_error = self.inline_error;
        let claimed = {
            let mut session = session.write();
            if retry {
                session.retry_same_topic()
            } else {
                session.begin_start()
            }
        };
        let request = match claimed {
            Ok(request) => request,
            Err(err) => {
                inline_error.set(Some(ViewError::from(err)));
                return;
            }
        };
        inline_error.set(None);

        let controller = self.clone();
        spawn(async move {
            let generated = controller.quiz_loop.generate(&request).await;
            if !controller.guard.is_mounted() {
                return;
            }
            let entered = controller
                .quiz_loop
                .enter_quiz(&mut session.write(), generated);
            match entered {
                Ok(()) => {
                    info!("quiz started on topic {}", request.topic_id);
                    controller.run_countdown();
                }
                Err(err) => controller.toaster.error(&ViewError::from(err)),
            }
        });
    }

    fn tick(&self) -> Duration {
        #[cfg(test)]
        if let Some(tick) = self.tick_override.get() {
            return tick;
        }
        TICK
    }

    fn run_countdown(&self) {
        let tick = self.tick();
        let mut countdown = self.countdown;
        if let Some(task) = countdown.write().take() {
            task.cancel();
        }
        let controller = self.clone();
        let task = spawn(async move {
            let mut session = controller.session;
            loop {
                tokio::time::sleep(tick).await;
                let outcome = session.write().tick();
                match outcome {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Expired => {
                        // This task is finishing; drop the handle before submit cancels it.
                        let mut countdown = controller.countdown;
                        countdown.write().take();
                        controller.submit(SubmitReason::TimerExpired);
                        break;
                    }
                    TickOutcome::Idle => break,
                }
            }
        });
        countdown.set(Some(task));
    }

    /// Shared by the Submit button and timer expiry. Only the first caller gets
    /// past `begin_submission`.
    fn submit(&self, reason: SubmitReason) {
        let mut session = self.session;
        let Some(submission) = session.write().begin_submission(reason) else {
            return;
        };
        let mut countdown = self.countdown;
        if let Some(task) = countdown.write().take() {
            task.cancel();
        }

        let controller = self.clone();
        spawn(async move {
            let graded = controller.quiz_loop.evaluate(&submission).await;
            if !controller.guard.is_mounted() {
                return;
            }
            let settled = controller
                .quiz_loop
                .settle_submission(&mut session.write(), &submission, graded);
            match settled {
                Ok(SubmitOutcome::Graded(result)) => {
                    info!("quiz graded at {}%", result.percentage());
                }
                Ok(_) => {}
                Err(err) => {
                    controller.toaster.error(&ViewError::from(err));
                    if session.read().remaining_seconds() > 0 {
                        controller.run_countdown();
                    }
                }
            }
        });
    }

    fn new_quiz(&self) {
        let mut countdown = self.countdown;
        if let Some(task) = countdown.write().take() {
            task.cancel();
        }
        let mut inline_error = self.inline_error;
        inline_error.set(None);
        let mut session = self.session;
        session.write().new_quiz();
    }
}

//
// ─── VIEW ──────────────────────────────────────────────────────────────────────
//

#[component]
pub fn TutorView() -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let guard = use_mount_guard();

    let session = use_signal(QuizSession::new);
    let countdown = use_signal(|| None::<Task>);
    let inline_error = use_signal(|| None::<ViewError>);

    let quiz_loop = ctx.quiz_loop();
    let controller = QuizController {
        session,
        countdown,
        inline_error,
        quiz_loop: Arc::clone(&quiz_loop),
        toaster,
        guard,
        #[cfg(test)]
        tick_override: try_consume_context::<TutorTestHandles>()
            .map(|handles| handles.tick)
            .unwrap_or_default(),
    };

    let mut roadmaps = use_resource(move || {
        let quiz_loop = Arc::clone(&quiz_loop);
        let mut session = session;
        async move {
            let list = quiz_loop.fetch_roadmaps().await?;
            session.write().set_roadmaps(list);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&roadmaps);
    let phase = session.read().phase();

    let start = {
        let controller = controller.clone();
        use_callback(move |retry: bool| controller.start(retry))
    };
    let submit = {
        let controller = controller.clone();
        use_callback(move |reason: SubmitReason| controller.submit(reason))
    };
    let new_quiz = use_callback(move |()| controller.new_quiz());

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<TutorTestHandles>() {
                handles.register(session, start, submit, new_quiz);
            }
        }
    }

    let on_start = move |()| start.call(false);
    let on_submit = move |()| submit.call(SubmitReason::Manual);
    let on_retry = move |()| start.call(true);
    let on_new = move |()| new_quiz.call(());

    rsx! {
        div { class: "page tutor",
            h2 { "AI Tutor" }
            match phase {
                QuizPhase::Setup => match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        LoadingPanel { label: "Loading your roadmaps...".to_string() }
                    },
                    ViewState::Error(error) => rsx! {
                        ErrorPanel { error, on_retry: move |()| roadmaps.restart() }
                    },
                    ViewState::Ready(()) => rsx! {
                        SetupPanel { session, error: inline_error, on_start }
                    },
                },
                QuizPhase::Quiz => rsx! {
                    QuizPanel { session, on_submit }
                },
                QuizPhase::Results => rsx! {
                    ResultsPanel { session, on_retry, on_new }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct TutorTestHandles {
    inner: Rc<RefCell<Option<TutorHandles>>>,
    tick: Rc<Cell<Option<Duration>>>,
}

#[cfg(test)]
#[derive(Clone, Copy)]
pub(crate) struct TutorHandles {
    pub session: Signal<QuizSession>,
    pub start: Callback<bool>,
    pub submit: Callback<SubmitReason>,
    pub new_quiz: Callback<()>,
}

#[cfg(test)]
impl TutorTestHandles {
    fn register(
        &self,
        session: Signal<QuizSession>,
        start: Callback<bool>,
        submit: Callback<SubmitReason>,
        new_quiz: Callback<()>,
    ) {
        *self.inner.borrow_mut() = Some(TutorHandles {
            session,
            start,
            submit,
            new_quiz,
        });
    }

    /// Countdowns started after this call tick every `tick` instead of 1s.
    pub(crate) fn set_tick(&self, tick: Duration) {
        self.tick.set(Some(tick));
    }

    pub(crate) fn get(&self) -> TutorHandles {
        (*self.inner.borrow()).expect("tutor handles registered")
    }
}
