/// `FILE_ATTRIBUTE_REPARSE_POINT`
pub const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x0000_0400;
/// Sentinel returned by the attribute query when it fails.
pub const INVALID_FILE_ATTRIBUTES: u32 = 0xFFFF_FFFF;
/// `FSCTL_GET_REPARSE_POINT`
pub const FSCTL_GET_REPARSE_POINT: u32 = 0x0009_00A8;
pub const MAXIMUM_REPARSE_DATA_BUFFER_SIZE: usize = 16 * 1024;
/// `ERROR_NOT_SUPPORTED`
pub const ERROR_NOT_SUPPORTED: u32 = 50;

/// Attribute word of a filesystem entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FileAttributes(pub u32);

impl FileAttributes {
    pub fn is_valid(self) -> bool {
        self.0 != INVALID_FILE_ATTRIBUTES
    }

    pub fn is_reparse_point(self) -> bool {
        (self.0 & FILE_ATTRIBUTE_REPARSE_POINT) != 0
    }
}

/// Native primitives consumed by the reparse-point core.
///
/// Errors are raw platform status codes, captured by the failing call
/// itself.
pub trait OsFacade: Send + Sync {
    type Handle: Copy;

    fn query_attributes(&self, path: &str) -> Result<FileAttributes, u32>;

    /// Opens `path` without following reparse points; directories allowed.
    fn open_for_metadata(&self, path: &str) -> Result<Self::Handle, u32>;

    /// Issues `code` against `handle` and returns the bytes written, at
    /// most `out_capacity`.
    fn control_request(
        &self,
        handle: Self::Handle,
        code: u32,
        out_capacity: usize,
    ) -> Result<Vec<u8>, u32>;

    fn close(&self, handle: Self::Handle);
}

/// Facade for hosts without reparse points: nothing is ever a link.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughFacade;

impl OsFacade for PassThroughFacade {
    type Handle = ();

    fn query_attributes(&self, _path: &str) -> Result<FileAttributes, u32> {
        Ok(FileAttributes(0))
    }

    fn open_for_metadata(&self, _path: &str) -> Result<(), u32> {
        Err(ERROR_NOT_SUPPORTED)
    }

    fn control_request(&self, _handle: (), _code: u32, _out_capacity: usize) -> Result<Vec<u8>, u32> {
        Err(ERROR_NOT_SUPPORTED)
    }

    fn close(&self, _handle: ()) {}
}
