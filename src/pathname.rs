//! Windows path algebra that works on any host.
//!
//! Link targets come out of reparse buffers as Windows path text, so the
//! resolver cannot lean on `std::path` when it runs (or is tested) on a
//! non-Windows host. Both `\` and `/` are accepted as separators; output
//! always uses `\`.

use crate::error::LinkError;

const MAX_INPUT_PATH_BYTES: usize = 32 * 1024;
const VERBATIM_PREFIX: &str = r"\\?\";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootKind {
    /// `a\b`
    Relative,
    /// `C:a\b`
    DriveRelative(char),
    /// `\a\b`: rooted on whatever drive the context supplies.
    Rooted,
    /// `C:\a\b`
    Drive(char),
    /// `\\server\share\a`, including device forms such as `\\?\C:`.
    Unc { server: String, share: String },
}

impl RootKind {
    pub fn is_absolute(&self) -> bool {
        matches!(self, RootKind::Drive(_) | RootKind::Unc { .. })
    }
}

fn is_sep(b: u8) -> bool {
    b == b'\\' || b == b'/'
}

/// Byte length of the drive or UNC prefix.
fn prefix_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && is_sep(bytes[0]) && is_sep(bytes[1]) {
        let rest = &bytes[2..];
        let Some(server_end) = rest.iter().position(|b| is_sep(*b)) else {
            return bytes.len();
        };
        let share_start = server_end + 1;
        let share_end = rest[share_start..]
            .iter()
            .position(|b| is_sep(*b))
            .map(|i| share_start + i)
            .unwrap_or(rest.len());
        return 2 + share_end;
    }
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return 2;
    }
    0
}

fn root_end(path: &str) -> usize {
    let prefix = prefix_len(path);
    let seps = path.as_bytes()[prefix..]
        .iter()
        .take_while(|b| is_sep(**b))
        .count();
    prefix + seps
}

/// Classifies the anchor of `path` and returns the remainder after it.
pub fn parse_root(path: &str) -> (RootKind, &str) {
    let prefix = prefix_len(path);
    let end = root_end(path);
    let rooted = end > prefix;
    let rest = &path[end..];

    if prefix == 2 && path.as_bytes()[1] == b':' {
        let drive = (path.as_bytes()[0] as char).to_ascii_uppercase();
        return if rooted {
            (RootKind::Drive(drive), rest)
        } else {
            (RootKind::DriveRelative(drive), rest)
        };
    }
    if prefix > 0 {
        let mut parts = path[2..prefix].split(['\\', '/']);
        let server = parts.next().unwrap_or_default().to_string();
        let share = parts.next().unwrap_or_default().to_string();
        return (RootKind::Unc { server, share }, rest);
    }
    if rooted {
        (RootKind::Rooted, rest)
    } else {
        (RootKind::Relative, rest)
    }
}

/// True for fully qualified paths: `C:\x` or `\\server\share\x`.
///
/// `\x` is not absolute: it still needs a drive from its context.
pub fn is_absolute(path: &str) -> bool {
    parse_root(path).0.is_absolute()
}

/// Everything before the final component, trailing separators stripped
/// unless they form the root.
pub fn dirname(path: &str) -> &str {
    let prefix = prefix_len(path);
    let root = root_end(path);
    match path.as_bytes()[prefix..].iter().rposition(|b| is_sep(*b)) {
        None => &path[..prefix],
        Some(idx) => {
            let mut end = prefix + idx + 1;
            while end > root && is_sep(path.as_bytes()[end - 1]) {
                end -= 1;
            }
            &path[..end]
        }
    }
}

/// Appends `target` to `base`. A target carrying its own drive or share
/// replaces `base`; a rooted target keeps only the drive of `base`.
pub fn join(base: &str, target: &str) -> String {
    if prefix_len(target) > 0 {
        return target.to_string();
    }
    let base_prefix = &base[..prefix_len(base)];
    if target.as_bytes().first().copied().is_some_and(is_sep) {
        return format!("{base_prefix}{target}");
    }
    if base.is_empty() {
        return target.to_string();
    }

    let tail = &base[base_prefix.len()..];
    let needs_sep = if tail.is_empty() {
        !base_prefix.ends_with(':')
    } else {
        !tail.as_bytes().last().copied().is_some_and(is_sep)
    };
    if needs_sep {
        format!("{base}\\{target}")
    } else {
        format!("{base}{target}")
    }
}

/// Lexically collapses `.`, `..` and repeated separators.
///
/// `..` at the root is dropped; leading `..` of a relative path is kept.
/// Verbatim `\\?\` paths are returned untouched since the native layer
/// gives them no `.`/`..` meaning.
pub fn normalize(path: &str) -> Result<String, LinkError> {
    if path.len() > MAX_INPUT_PATH_BYTES {
        return Err(LinkError::InvalidPath {
            reason: "path too long",
        });
    }
    if path.starts_with(VERBATIM_PREFIX) {
        return Ok(path.to_string());
    }

    let prefix = path[..prefix_len(path)].replace('/', "\\");
    let end = root_end(path);
    let rooted = end > prefix.len() || prefix.starts_with(r"\\");

    let mut components: Vec<&str> = Vec::new();
    for part in path[end..].split(['\\', '/']) {
        match part {
            "" | "." => {}
            ".." => {
                if components.last().is_some_and(|last| *last != "..") {
                    components.pop();
                } else if !rooted {
                    components.push("..");
                }
            }
            _ => components.push(part),
        }
    }

    let mut out = prefix;
    if rooted {
        out.push('\\');
    }
    out.push_str(&components.join("\\"));
    if out.is_empty() {
        out.push('.');
    }
    Ok(out)
}

/// Rewrites a link target read from `link` into the next path to probe.
pub fn rebase(link: &str, target: &str) -> Result<String, LinkError> {
    if is_absolute(target) {
        return Ok(target.to_string());
    }
    normalize(&join(dirname(link), target))
}
