//! Configuration schema types for the tutor.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults documented in the template.

mod model;
mod server;
mod system;
mod tutor;

pub use model::*;
pub use server::*;
pub use system::*;
pub use tutor::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TutorConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub tutor: TutorSettings,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
