use super::facade::OsFacade;
use crate::error::LinkError;

/// Reports whether `path` carries the reparse-point attribute.
///
/// No locking: the answer can be stale by the time the caller acts on it.
pub fn is_reparse_point<F: OsFacade + ?Sized>(facade: &F, path: &str) -> Result<bool, LinkError> {
    let attrs = facade
        .query_attributes(path)
        .map_err(|code| LinkError::Lookup {
            path: path.to_string(),
            code,
        })?;
    Ok(attrs.is_reparse_point())
}
