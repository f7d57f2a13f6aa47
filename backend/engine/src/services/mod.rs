pub mod assessment_service;
pub mod contribution;
pub mod engine;
pub mod matcher;
pub mod session_service;
pub mod transcription;

pub use assessment_service::AssessmentService;
pub use engine::AssessmentEngine;
pub use session_service::SessionService;
pub use transcription::Transcriber;
