//! Layered resolution of mockgen's command-line settings.
//!
//! Options are declared on a [`Registry`](mockgen_argparse::registry::Registry)
//! through the helpers in [`options`]. After argv is matched, each logical
//! setting is resolved by a function in [`resolve`], following the precedence
//! and validation rules recorded in [`policy`]:
//!
//! 1. the primary option
//! 2. its convenience spelling, if any
//! 3. an environment variable
//! 4. a default computed from already-resolved settings
//!
//! [`commands`] bundles declaration and resolution for each mockgen command.

pub mod commands;
pub mod environment;
pub mod error;
pub mod log_level;
pub mod options;
pub mod policy;
pub mod resolve;

pub use commands::{
    GenerateConfig, GenerateOptions, GlobalOptions, InstallConfig, InstallOptions,
    MetagenerateConfig, MetagenerateOptions, UninstallConfig, UninstallOptions,
};
pub use environment::Environment;
pub use error::ResolveError;
pub use log_level::LogLevel;
