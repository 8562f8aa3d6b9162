//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it provides config loading, the shared API
//! state with its slice registry, and the HTTP error taxonomy.
//!
//! ## Config loading
//! ```rust,ignore
//! use hhub_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config::<serde_json::Value>(Some("server")).unwrap();
//! ```

pub mod config;
pub mod registry;
pub mod server;

pub use hhub_domain as domain;
