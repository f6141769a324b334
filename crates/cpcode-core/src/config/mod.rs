//! Configuration for link generation
//!
//! Settings are read from a `cpcode.toml` file:
//! - `api_endpoint`: lookup service base URL (empty = use the local remote)
//! - `cache_timeout`: seconds a resolved URL stays fresh
//! - `lookup_timeout`: seconds before a lookup request is abandoned
//! - `remote_name`: remote read in local remote mode

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_config, parse_config_str};
pub use paths::default_config_path;
pub use schema::CpcodeConfig;
pub use store::ConfigStore;
