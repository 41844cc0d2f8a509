use std::ffi::c_void;

use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, GetFileAttributesW, FILE_FLAG_BACKUP_SEMANTICS, FILE_FLAG_OPEN_REPARSE_POINT,
    FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows_sys::Win32::System::IO::DeviceIoControl;

use crate::common::wide::str_to_wide;
use crate::reparse::{FileAttributes, OsFacade};

/// The native facade: `kernel32` file and device-control calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Facade;

impl OsFacade for Win32Facade {
    type Handle = HANDLE;

    fn query_attributes(&self, path: &str) -> Result<FileAttributes, u32> {
        let wide = str_to_wide(path);
        let attrs = FileAttributes(unsafe { GetFileAttributesW(wide.as_ptr()) });
        if !attrs.is_valid() {
            return Err(unsafe { GetLastError() });
        }
        Ok(attrs)
    }

    fn open_for_metadata(&self, path: &str) -> Result<HANDLE, u32> {
        let wide = str_to_wide(path);
        // No access rights are requested: the handle only serves the
        // reparse-point query.
        let handle = unsafe {
            CreateFileW(
                wide.as_ptr(),
                0,
                FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                std::ptr::null(),
                OPEN_EXISTING,
                FILE_FLAG_OPEN_REPARSE_POINT | FILE_FLAG_BACKUP_SEMANTICS,
                0,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(unsafe { GetLastError() });
        }
        Ok(handle)
    }

    fn control_request(
        &self,
        handle: HANDLE,
        code: u32,
        out_capacity: usize,
    ) -> Result<Vec<u8>, u32> {
        let mut buffer = vec![0u8; out_capacity];
        let mut returned: u32 = 0;
        let ok = unsafe {
            DeviceIoControl(
                handle,
                code,
                std::ptr::null(),
                0,
                buffer.as_mut_ptr() as *mut c_void,
                out_capacity as u32,
                &mut returned,
                std::ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(unsafe { GetLastError() });
        }
        buffer.truncate(returned as usize);
        Ok(buffer)
    }

    fn close(&self, handle: HANDLE) {
        unsafe {
            CloseHandle(handle);
        }
    }
}
