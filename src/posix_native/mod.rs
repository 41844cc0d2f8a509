//! Hosts with native symlinks: delegate to `lstat`/`readlink` directly.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::common::types::LinkConfig;
use crate::error::LinkError;
use crate::reparse::ResolveOptions;
use crate::resolver::LinkResolver;

/// `EIO`, reported when the host gives no errno.
const FALLBACK_CODE: u32 = 5;

pub struct NativeLinks {
    options: ResolveOptions,
}

pub type PlatformLinks = NativeLinks;

impl NativeLinks {
    pub fn from_config(config: &LinkConfig) -> Self {
        Self::with_options(ResolveOptions::from_config(config))
    }

    pub fn with_options(options: ResolveOptions) -> Self {
        Self { options }
    }
}

fn native_code(err: &io::Error) -> u32 {
    err.raw_os_error()
        .and_then(|code| u32::try_from(code).ok())
        .unwrap_or(FALLBACK_CODE)
}

fn into_string(path: PathBuf) -> Result<String, LinkError> {
    path.into_os_string()
        .into_string()
        .map_err(|_| LinkError::InvalidPath {
            reason: "link target is not valid UTF-8",
        })
}

/// Lexical `.`/`..` folding; the filesystem is not consulted.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

impl LinkResolver for NativeLinks {
    fn is_link(&self, path: &str) -> Result<bool, LinkError> {
        let metadata = std::fs::symlink_metadata(path).map_err(|err| LinkError::Lookup {
            path: path.to_string(),
            code: native_code(&err),
        })?;
        Ok(metadata.file_type().is_symlink())
    }

    fn read_link(&self, path: &str) -> Result<String, LinkError> {
        match std::fs::read_link(path) {
            Ok(target) => into_string(target),
            // readlink(2) answers EINVAL for an entry that exists but is no link.
            Err(err) if err.kind() == io::ErrorKind::InvalidInput => Err(LinkError::Control {
                path: path.to_string(),
                code: native_code(&err),
            }),
            Err(err) => Err(LinkError::Open {
                path: path.to_string(),
                code: native_code(&err),
            }),
        }
    }

    fn rebase(&self, link: &str, target: &str) -> Result<String, LinkError> {
        let target_path = Path::new(target);
        if target_path.is_absolute() {
            return Ok(target.to_string());
        }
        let dir = Path::new(link).parent().unwrap_or_else(|| Path::new(""));
        into_string(normalize(&dir.join(target_path)))
    }

    fn max_hops(&self) -> Option<usize> {
        self.options.max_hops
    }
}
