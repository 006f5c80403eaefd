//! Glide Core
//!
//! Configuration plumbing shared by the Glide crates.
//!
//! # Features
//!
//! - **Typed Options**: `ConfigOption<T>` holds a current and default value
//!   and can be read from and written to its textual form
//! - **Change Notification**: update handlers fire whenever a write actually
//!   changes the stored value
//! - **Sections**: `OptionSection` groups heterogeneous options by name so
//!   raw `key = value` input can be routed to the right option

pub mod error;
pub mod option;
pub mod section;

pub use error::{ConfigError, ValueParseError};
pub use option::{ConfigOption, OptionValue, UpdateHandlerId};
pub use section::OptionSection;
