use super::facade::{OsFacade, FSCTL_GET_REPARSE_POINT, MAXIMUM_REPARSE_DATA_BUFFER_SIZE};
use crate::error::LinkError;

/// Closes the wrapped handle when dropped.
struct ScopedHandle<'a, F: OsFacade + ?Sized> {
    facade: &'a F,
    handle: F::Handle,
}

impl<F: OsFacade + ?Sized> Drop for ScopedHandle<'_, F> {
    fn drop(&mut self) {
        self.facade.close(self.handle);
    }
}

/// Fetches the raw reparse buffer attached to `path`.
///
/// The returned vector holds exactly the bytes the control request
/// reported, capped at [`MAXIMUM_REPARSE_DATA_BUFFER_SIZE`].
pub fn read_reparse_buffer<F: OsFacade + ?Sized>(facade: &F, path: &str) -> Result<Vec<u8>, LinkError> {
    let handle = facade
        .open_for_metadata(path)
        .map_err(|code| LinkError::Open {
            path: path.to_string(),
            code,
        })?;
    let scoped = ScopedHandle { facade, handle };

    let mut bytes = facade
        .control_request(
            scoped.handle,
            FSCTL_GET_REPARSE_POINT,
            MAXIMUM_REPARSE_DATA_BUFFER_SIZE,
        )
        .map_err(|code| LinkError::Control {
            path: path.to_string(),
            code,
        })?;
    bytes.truncate(MAXIMUM_REPARSE_DATA_BUFFER_SIZE);
    Ok(bytes)
}
