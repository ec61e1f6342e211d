// Foundations
pub mod error;
pub mod locale;

// Primitive extensions
pub mod boolean;
pub mod bytes;
pub mod date;
pub mod encoding;
pub mod list;
pub mod number;
pub mod random;
pub mod storage;
pub mod string;

// Serialization and filesystem helpers
pub mod csv;
pub mod files;
pub mod volume;
pub mod xml;

// Caller-owned configuration
pub mod defaults;

// Re-export common types for convenience
pub use defaults::Settings;
pub use error::{Error, ErrorCode, Result};
pub use locale::Locale;
