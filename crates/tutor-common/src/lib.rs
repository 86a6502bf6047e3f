pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, TutorError};
pub use id::SessionId;
pub use types::LearningLevel;

pub type Result<T> = std::result::Result<T, TutorError>;
