use super::decoder::{decode_print_name, ReparseData};
use super::facade::OsFacade;
use super::prober::is_reparse_point;
use super::reader::read_reparse_buffer;
use crate::common::types::{LinkConfig, DEFAULT_MAX_HOPS, LINK_FLAG_UNBOUNDED_HOPS};
use crate::error::LinkError;
use crate::pathname;
use crate::resolver::LinkResolver;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolveOptions {
    pub max_hops: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_hops: Some(DEFAULT_MAX_HOPS as usize),
        }
    }
}

impl ResolveOptions {
    pub fn unbounded() -> Self {
        Self { max_hops: None }
    }

    pub fn from_config(config: &LinkConfig) -> Self {
        if config.flags & LINK_FLAG_UNBOUNDED_HOPS != 0 {
            return Self::unbounded();
        }
        let max_hops = match config.max_hops {
            0 => DEFAULT_MAX_HOPS,
            value => value,
        };
        Self {
            max_hops: Some(max_hops as usize),
        }
    }
}

/// Link operations emulated on top of reparse points.
pub struct ReparseLinks<F> {
    facade: F,
    options: ResolveOptions,
}

impl<F: OsFacade> ReparseLinks<F> {
    pub fn new(facade: F, options: ResolveOptions) -> Self {
        Self { facade, options }
    }

    pub fn facade(&self) -> &F {
        &self.facade
    }

    /// Reads and fully decodes the reparse buffer of `path`.
    pub fn read_reparse_data(&self, path: &str) -> Result<ReparseData, LinkError> {
        let buffer = read_reparse_buffer(&self.facade, path)?;
        ReparseData::parse(&buffer)
    }
}

impl<F: OsFacade> LinkResolver for ReparseLinks<F> {
    fn is_link(&self, path: &str) -> Result<bool, LinkError> {
        is_reparse_point(&self.facade, path)
    }

    fn read_link(&self, path: &str) -> Result<String, LinkError> {
        let buffer = read_reparse_buffer(&self.facade, path)?;
        decode_print_name(&buffer)
    }

    fn rebase(&self, link: &str, target: &str) -> Result<String, LinkError> {
        pathname::rebase(link, target)
    }

    fn max_hops(&self) -> Option<usize> {
        self.options.max_hops
    }
}
