// src/quiz/mod.rs

pub mod builder;
pub mod distractor;
pub mod error;
pub mod service;
pub mod session;
pub mod store;

pub use error::QuizError;
pub use service::QuizService;
