pub use error::*;
pub use sitepack::*;
pub use sitepack_filesystem as file_system;
pub use watch::*;

pub mod engine;
pub mod sitepack;

mod error;
mod plugins;
mod watch;

#[cfg(test)]
mod test_utils;
