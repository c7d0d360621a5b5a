//! Legendary Injector plugin core.
//!
//! Business logic for moving Legendary games between machines: dump an
//! installed game (files, record, metadata) into one zip, and install such
//! a zip back into the launcher's library. The host application implements
//! [`Host`] and drives the flows; this crate never renders UI or talks to
//! launcher processes.

pub mod commands;
pub mod error;
pub mod host;
pub mod service;

// Re-export primary types for convenience.
pub use commands::{MenuAction, MenuCommand};
pub use error::PluginError;
pub use host::Host;
pub use service::Injector;

/// Human-readable service name reported to the host.
pub const SERVICE_NAME: &str = "Legendary Injector";

/// Stable slug identifying the service.
pub const SERVICE_SLUG: &str = "linjector";

/// Service version string reported to the host.
pub const SERVICE_VERSION: &str = "v1.0";

/// Directory under the host's game dir where archives are installed,
/// one subdirectory per app name.
pub const INSTALL_NAMESPACE: &str = "legendary-injector";
