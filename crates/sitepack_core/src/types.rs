pub use self::alias::*;
pub use self::asset::*;
pub use self::build_mode::*;
pub use self::copy::*;
pub use self::external::*;
pub use self::file_type::*;
pub use self::html::*;
pub use self::optimize_deps::*;
pub use self::output::*;
pub use self::replace::*;
pub use self::watch::*;

mod alias;
mod asset;
mod build_mode;
mod copy;
mod external;
mod file_type;
mod html;
mod optimize_deps;
mod output;
mod replace;
mod watch;
