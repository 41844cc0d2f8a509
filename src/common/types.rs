use core::ffi::c_char;

#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LinkStatus {
    Ok = 0,
    LookupError = 1,
    OpenError = 2,
    ControlError = 3,
    UnsupportedLinkKind = 4,
    MalformedBuffer = 5,
    TooManyHops = 6,
    EncodingError = 7,
    InvalidPath = 8,
    InvalidArgument = 9,
    IoError = 10,
}

#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LinkLogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

/// Follow links without a hop ceiling. A cyclic chain then never terminates.
pub const LINK_FLAG_UNBOUNDED_HOPS: u32 = 1 << 0;

/// Hop ceiling used when `LinkConfig::max_hops` is zero.
pub const DEFAULT_MAX_HOPS: u32 = 63;

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct LinkConfig {
    pub size: u32,
    pub flags: u32,
    pub max_hops: u32,
    pub reserved: [u64; 4],
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            size: std::mem::size_of::<LinkConfig>() as u32,
            flags: 0,
            max_hops: 0,
            reserved: [0; 4],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct LinkStringView {
    pub ptr: *const c_char,
    pub len: usize,
}

impl LinkStringView {
    pub const fn empty() -> Self {
        Self {
            ptr: std::ptr::null(),
            len: 0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct LinkErrorInfo {
    pub size: u32,
    pub has_native_code: u32,
    pub native_code: u32,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct LinkLogRecord {
    pub level: LinkLogLevel,
    pub target: LinkStringView,
    pub message: LinkStringView,
    pub file: LinkStringView,
    pub line: u32,
}
