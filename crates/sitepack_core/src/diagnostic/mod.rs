//! User facing errors for sitepack builds
mod code_frame;
mod diagnostic;
mod diagnostics;
mod error_kind;

pub use self::code_frame::*;
pub use self::diagnostic::*;
pub use self::diagnostics::*;
pub use self::error_kind::*;
