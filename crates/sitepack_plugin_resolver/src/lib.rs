pub use sitepack_resolver::*;

mod package_json;
mod sitepack_resolver;
