mod session;
mod workflow;

pub use session::{
    QuestionReview, QuizPhase, QuizSession, QuizSetup, StartRequest, Submission, SubmitReason,
    TickOutcome,
};
pub use workflow::{QuizLoopService, SubmitOutcome};
