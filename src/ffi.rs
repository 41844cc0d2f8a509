use core::ffi::{c_char, c_void};

use crate::common::types::*;
use crate::error::LinkError;
use crate::identity;
use crate::logging::{self, LinkLogCallback};
use crate::platform_links;
use crate::resolver::LinkResolver;

const MAX_INPUT_PATH_BYTES: usize = 32 * 1024;

#[repr(C)]
pub struct LinkHandle {
    inner: Box<dyn LinkResolver>,
}

unsafe fn string_view_to_str<'a>(view: *const LinkStringView) -> Result<&'a str, LinkStatus> {
    let view = view.as_ref().ok_or(LinkStatus::InvalidArgument)?;
    if view.ptr.is_null() {
        return Err(LinkStatus::InvalidArgument);
    }
    let bytes = std::slice::from_raw_parts(view.ptr as *const u8, view.len);
    if bytes.len() > MAX_INPUT_PATH_BYTES {
        return Err(LinkStatus::InvalidPath);
    }
    std::str::from_utf8(bytes).map_err(|_| LinkStatus::EncodingError)
}

/// Copies `value` into a `malloc`ed view owned by the caller.
fn write_string_view(value: &str, out: &mut LinkStringView) -> Result<(), LinkStatus> {
    if value.is_empty() {
        *out = LinkStringView::empty();
        return Ok(());
    }
    let bytes = value.as_bytes();
    let ptr = unsafe { libc::malloc(bytes.len()) } as *mut u8;
    if ptr.is_null() {
        return Err(LinkStatus::IoError);
    }
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, bytes.len());
    }
    out.ptr = ptr as *const c_char;
    out.len = bytes.len();
    Ok(())
}

fn write_error_info(out_error: *mut LinkErrorInfo, err: Option<&LinkError>) {
    let Some(out) = (unsafe { out_error.as_mut() }) else {
        return;
    };
    let code = err.and_then(LinkError::native_code);
    *out = LinkErrorInfo {
        size: std::mem::size_of::<LinkErrorInfo>() as u32,
        has_native_code: code.is_some() as u32,
        native_code: code.unwrap_or(0),
    };
}

/// Runs `op` on the resolver behind `handle` with the decoded `path`,
/// reporting failures through the status and `out_error`.
fn with_path<T>(
    handle: *mut LinkHandle,
    path: *const LinkStringView,
    out_error: *mut LinkErrorInfo,
    op: impl FnOnce(&dyn LinkResolver, &str) -> Result<T, LinkError>,
) -> Result<T, LinkStatus> {
    write_error_info(out_error, None);
    let handle = unsafe { handle.as_ref() }.ok_or(LinkStatus::InvalidArgument)?;
    let path = unsafe { string_view_to_str(path) }?;
    op(handle.inner.as_ref(), path).map_err(|err| {
        log::debug!("{err}");
        write_error_info(out_error, Some(&err));
        err.status()
    })
}

fn status_of(result: Result<(), LinkStatus>) -> LinkStatus {
    match result {
        Ok(()) => LinkStatus::Ok,
        Err(status) => status,
    }
}

#[no_mangle]
pub extern "C" fn wclink_create(config: *const LinkConfig) -> *mut LinkHandle {
    let config = unsafe { config.as_ref() }.copied().unwrap_or_default();
    let handle = LinkHandle {
        inner: Box::new(platform_links(&config)),
    };
    Box::into_raw(Box::new(handle))
}

#[no_mangle]
pub extern "C" fn wclink_destroy(handle: *mut LinkHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[no_mangle]
pub extern "C" fn wclink_is_link(
    handle: *mut LinkHandle,
    path: *const LinkStringView,
    out_is_link: *mut bool,
    out_error: *mut LinkErrorInfo,
) -> LinkStatus {
    let result = unsafe { out_is_link.as_mut() }
        .ok_or(LinkStatus::InvalidArgument)
        .and_then(|out| {
            *out = with_path(handle, path, out_error, |links, path| links.is_link(path))?;
            Ok(())
        });
    status_of(result)
}

#[no_mangle]
pub extern "C" fn wclink_read_link(
    handle: *mut LinkHandle,
    path: *const LinkStringView,
    out_target: *mut LinkStringView,
    out_error: *mut LinkErrorInfo,
) -> LinkStatus {
    let result = unsafe { out_target.as_mut() }
        .ok_or(LinkStatus::InvalidArgument)
        .and_then(|out| {
            let target = with_path(handle, path, out_error, |links, path| links.read_link(path))?;
            write_string_view(&target, out)
        });
    status_of(result)
}

#[no_mangle]
pub extern "C" fn wclink_resolve_real_path(
    handle: *mut LinkHandle,
    path: *const LinkStringView,
    out_resolved: *mut LinkStringView,
    out_error: *mut LinkErrorInfo,
) -> LinkStatus {
    let result = unsafe { out_resolved.as_mut() }
        .ok_or(LinkStatus::InvalidArgument)
        .and_then(|out| {
            let resolved = with_path(handle, path, out_error, |links, path| {
                links.resolve_real_path(path)
            })?;
            write_string_view(&resolved, out)
        });
    status_of(result)
}

#[no_mangle]
pub extern "C" fn wclink_free_string(value: LinkStringView) {
    if value.ptr.is_null() {
        return;
    }
    unsafe {
        libc::free(value.ptr as *mut libc::c_void);
    }
}

#[no_mangle]
pub extern "C" fn wclink_effective_user_id() -> u32 {
    identity::effective_user_id()
}

#[no_mangle]
pub extern "C" fn wclink_log_set_stderr(level: LinkLogLevel) -> LinkStatus {
    logging::log_set_stderr(level)
}

#[no_mangle]
pub extern "C" fn wclink_log_set_callback(
    callback: LinkLogCallback,
    user_data: *mut c_void,
    level: LinkLogLevel,
) -> LinkStatus {
    logging::log_set_callback(callback, user_data, level)
}

#[no_mangle]
pub extern "C" fn wclink_log_set_level(level: LinkLogLevel) -> LinkStatus {
    logging::log_set_level(level)
}

#[no_mangle]
pub extern "C" fn wclink_log_disable() -> LinkStatus {
    logging::log_disable()
}
