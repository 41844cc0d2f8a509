//! Decoding of `REPARSE_DATA_BUFFER` contents.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! 0   u32  ReparseTag
//! 4   u16  ReparseDataLength   (bytes following the 8-byte header)
//! 6   u16  Reserved
//! 8   u16  SubstituteNameOffset
//! 10  u16  SubstituteNameLength
//! 12  u16  PrintNameOffset
//! 14  u16  PrintNameLength
//! 16  u32  Flags               (symbolic links only)
//! ..       PathBuffer
//! ```
//!
//! Name offsets are relative to the start of `PathBuffer` and, like the
//! lengths, count bytes rather than UTF-16 code units.

use crate::common::wide::decode_utf16_le;
use crate::error::LinkError;

pub const IO_REPARSE_TAG_MOUNT_POINT: u32 = 0xA000_0003;
pub const IO_REPARSE_TAG_SYMLINK: u32 = 0xA000_000C;
/// The stored target is relative to the directory holding the link.
pub const SYMLINK_FLAG_RELATIVE: u32 = 0x0000_0001;

const HEADER_LEN: usize = 8;
const SUBSTITUTE_NAME_FIELDS: usize = 0;
const PRINT_NAME_FIELDS: usize = 4;
const FLAGS_FIELD: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReparseTag {
    Symlink,
    MountPoint,
}

impl ReparseTag {
    pub fn from_raw(tag: u32) -> Result<Self, LinkError> {
        match tag {
            IO_REPARSE_TAG_SYMLINK => Ok(ReparseTag::Symlink),
            IO_REPARSE_TAG_MOUNT_POINT => Ok(ReparseTag::MountPoint),
            _ => Err(LinkError::UnsupportedLinkKind { tag }),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            ReparseTag::Symlink => IO_REPARSE_TAG_SYMLINK,
            ReparseTag::MountPoint => IO_REPARSE_TAG_MOUNT_POINT,
        }
    }

    /// Size of the fixed fields preceding `PathBuffer`.
    pub fn fixed_len(self) -> usize {
        match self {
            ReparseTag::Symlink => 12,
            ReparseTag::MountPoint => 8,
        }
    }
}

/// A decoded link reparse buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReparseData {
    Symlink {
        substitute_name: String,
        print_name: String,
        flags: u32,
    },
    MountPoint {
        substitute_name: String,
        print_name: String,
    },
}

impl ReparseData {
    pub fn parse(buffer: &[u8]) -> Result<Self, LinkError> {
        let payload = LinkPayload::parse(buffer)?;
        let substitute_name = payload.name_at(SUBSTITUTE_NAME_FIELDS)?;
        let print_name = payload.name_at(PRINT_NAME_FIELDS)?;
        Ok(match payload.tag {
            ReparseTag::Symlink => ReparseData::Symlink {
                substitute_name,
                print_name,
                flags: read_u32(payload.body, FLAGS_FIELD)?,
            },
            ReparseTag::MountPoint => ReparseData::MountPoint {
                substitute_name,
                print_name,
            },
        })
    }

    pub fn tag(&self) -> ReparseTag {
        match self {
            ReparseData::Symlink { .. } => ReparseTag::Symlink,
            ReparseData::MountPoint { .. } => ReparseTag::MountPoint,
        }
    }

    pub fn print_name(&self) -> &str {
        match self {
            ReparseData::Symlink { print_name, .. } | ReparseData::MountPoint { print_name, .. } => {
                print_name
            }
        }
    }

    pub fn substitute_name(&self) -> &str {
        match self {
            ReparseData::Symlink {
                substitute_name, ..
            }
            | ReparseData::MountPoint {
                substitute_name, ..
            } => substitute_name,
        }
    }

    pub fn is_relative(&self) -> bool {
        match self {
            ReparseData::Symlink { flags, .. } => flags & SYMLINK_FLAG_RELATIVE != 0,
            ReparseData::MountPoint { .. } => false,
        }
    }
}

/// Extracts the print name (the human-readable target) from a raw buffer.
pub fn decode_print_name(buffer: &[u8]) -> Result<String, LinkError> {
    LinkPayload::parse(buffer)?.name_at(PRINT_NAME_FIELDS)
}

/// Tag-validated view of the payload, bounded by `ReparseDataLength`.
struct LinkPayload<'a> {
    tag: ReparseTag,
    /// Fixed fields followed by `PathBuffer`.
    body: &'a [u8],
}

impl<'a> LinkPayload<'a> {
    fn parse(buffer: &'a [u8]) -> Result<Self, LinkError> {
        // The tag decides everything else, so nothing past it is read
        // before it is known.
        let tag = ReparseTag::from_raw(read_u32(buffer, 0)?)?;
        if buffer.len() < HEADER_LEN {
            return Err(LinkError::malformed("truncated reparse header"));
        }
        let data_length = read_u16(buffer, 4)? as usize;
        let body = buffer[HEADER_LEN..]
            .get(..data_length)
            .ok_or_else(|| LinkError::malformed("data length exceeds returned bytes"))?;
        if body.len() < tag.fixed_len() {
            return Err(LinkError::malformed("payload shorter than its fixed fields"));
        }
        Ok(Self { tag, body })
    }

    fn path_buffer(&self) -> &'a [u8] {
        &self.body[self.tag.fixed_len()..]
    }

    /// Decodes the name whose offset/length pair sits at `fields`.
    fn name_at(&self, fields: usize) -> Result<String, LinkError> {
        let start = read_u16(self.body, fields)? as usize;
        let length = read_u16(self.body, fields + 2)? as usize;
        if start % 2 != 0 || length % 2 != 0 {
            return Err(LinkError::malformed("name not aligned to UTF-16 code units"));
        }
        let end = start + length;
        let bytes = self
            .path_buffer()
            .get(start..end)
            .ok_or_else(|| LinkError::malformed("name range exceeds path buffer"))?;
        decode_utf16_le(bytes).ok_or_else(|| LinkError::malformed("name is not valid UTF-16"))
    }
}

fn read_u16(buffer: &[u8], at: usize) -> Result<u16, LinkError> {
    match buffer.get(at..at + 2) {
        Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
        _ => Err(LinkError::malformed("truncated field")),
    }
}

fn read_u32(buffer: &[u8], at: usize) -> Result<u32, LinkError> {
    match buffer.get(at..at + 4) {
        Some(&[a, b, c, d]) => Ok(u32::from_le_bytes([a, b, c, d])),
        _ => Err(LinkError::malformed("truncated field")),
    }
}
