//! Insert catalog and user settings persistence.
//!
//! Configuration lives in one TOML file: a `[settings]` table with the
//! cosmetic-feature toggles and sizes, and an `[[inserts]]` array holding
//! the catalog. Parsing and rendering work on strings; [`Config`] adds the
//! thin file wrappers. Bad values never reach the engine: out-of-range
//! settings fall back to defaults and malformed catalog entries are
//! skipped, each with a logged warning.

pub mod catalog;
pub mod errors;
pub mod settings;
pub mod store;

pub use catalog::Catalog;
pub use errors::ConfigError;
pub use settings::Settings;
pub use store::{parse_config, render_config, Config};
