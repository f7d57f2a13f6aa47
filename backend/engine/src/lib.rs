pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::AssessmentConfig;
pub use error::AssessmentError;
pub use models::{RenderInstruction, SessionEvent, SessionState, Stage};
pub use services::AssessmentService;
