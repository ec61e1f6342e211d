/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("files", "Deleted {}", path.display());
/// log_status!("csv", "Appended {} rows to {}", rows, path.display());
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `primext::string` instead of `primext::core::string`
pub use core::*;
pub use utils::*;

/// Every extension trait, for `use primext::prelude::*;`.
pub mod prelude {
    pub use crate::core::boolean::BoolExt;
    pub use crate::core::bytes::{Base64Formatting, BytesExt};
    pub use crate::core::csv::CsvExt;
    pub use crate::core::date::DateTimeExt;
    pub use crate::core::encoding::EncodingKind;
    pub use crate::core::files::PathExt;
    pub use crate::core::list::{JoinExt, SliceExt, VecExt};
    pub use crate::core::locale::Locale;
    pub use crate::core::number::IntExt;
    pub use crate::core::storage::DigitalStorage;
    pub use crate::core::string::{Position, StrExt};
    pub use crate::core::xml::{XmlExt, XmlFormatting, XmlOptions};
}
