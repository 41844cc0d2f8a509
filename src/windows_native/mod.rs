mod registry;
mod win32;

pub use registry::RegistryConfigStore;
pub use win32::Win32Facade;

use crate::common::types::LinkConfig;
use crate::reparse::{ReparseLinks, ResolveOptions};

pub type PlatformLinks = ReparseLinks<Win32Facade>;

impl PlatformLinks {
    pub fn from_config(config: &LinkConfig) -> Self {
        ReparseLinks::new(Win32Facade, ResolveOptions::from_config(config))
    }
}
