//! Reparse-point based link emulation.
//!
//! The pieces compose leaf-first: [`prober`] tests the reparse attribute,
//! [`reader`] fetches the raw buffer through an [`OsFacade`], [`decoder`]
//! extracts the stored target and [`resolver`] follows chains of links.

pub mod decoder;
pub mod facade;
pub mod prober;
pub mod reader;
pub mod resolver;

pub use decoder::{decode_print_name, ReparseData, ReparseTag};
pub use facade::{FileAttributes, OsFacade, PassThroughFacade};
pub use prober::is_reparse_point;
pub use reader::read_reparse_buffer;
pub use resolver::{ReparseLinks, ResolveOptions};
