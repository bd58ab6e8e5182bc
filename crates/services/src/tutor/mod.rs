mod service;
mod wire;

pub use service::{TutorApi, TutorService};
pub use wire::{
    CorrectAnswer, EvaluateRequest, EvaluatedQuestion, EvaluationResponse, GenerateTestRequest,
    GeneratedOption, GeneratedQuestion, GeneratedTest, HelperAnswer, HelperRequest,
};
