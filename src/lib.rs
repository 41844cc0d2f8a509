mod common;
mod error;
mod ffi;
mod identity;
mod logging;
mod resolver;

pub mod config;
pub mod pathname;
pub mod reparse;

#[cfg(windows)]
pub mod windows_native;
#[cfg(windows)]
pub use windows_native::PlatformLinks;

#[cfg(unix)]
pub mod posix_native;
#[cfg(unix)]
pub use posix_native::PlatformLinks;

#[cfg(not(any(windows, unix)))]
compile_error!("wclink only supports Windows and Unix targets.");

pub use crate::common::types::*;
pub use crate::common::wide;
pub use crate::error::LinkError;
pub use crate::ffi::*;
pub use crate::identity::{effective_user_id, ROOT_UID};
pub use crate::logging::{log_disable, log_set_callback, log_set_level, log_set_stderr, LinkLogCallback};
pub use crate::resolver::LinkResolver;

/// Binds link operations to the host's native facility.
///
/// Hosts with native symlinks delegate to it directly; Windows goes
/// through reparse-point decoding.
pub fn platform_links(config: &LinkConfig) -> PlatformLinks {
    PlatformLinks::from_config(config)
}
