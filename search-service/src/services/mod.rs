pub mod answer;
pub mod metrics;
pub mod providers;

pub use answer::AnswerService;
