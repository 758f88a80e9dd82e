//! Configuration system for unchain
//!
//! - JSON, JSONC, TOML and YAML configuration files
//! - Auto-discovery by traversing up directories
//! - Strong typing with serde and JSON Schema generation via schemars
//!
//! ## Configuration Files
//!
//! Looked up in this order in every directory, from the start directory up to
//! the filesystem root:
//! - `.unchainrc.json`
//! - `.unchainrc.jsonc` (comments and trailing commas allowed)
//! - `.unchainrc.toml`
//! - `unchain.yaml` / `unchain.yml`
//! - `unchain.json`
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "linter": {
//!     "enabled": true,
//!     "rules": {
//!       "style/no-chained-assignments": "error"
//!     }
//!   },
//!   "autofix": {
//!     "maxPasses": 10,
//!     "validateSyntax": true
//!   },
//!   "files": {
//!     "include": ["src/**/*.js"],
//!     "exclude": ["**/node_modules/**", "**/*.min.js"]
//!   }
//! }
//! ```

mod loader;
mod unchain_config;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use unchain_config::{
    AutofixConfiguration, FilesConfiguration, LinterConfiguration, RuleSeverity, UnchainConfig,
};
