use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use wclink::reparse::{ReparseData, ReparseTag};
use wclink::{platform_links, LinkConfig, LinkError, LinkResolver, PlatformLinks};

const ERROR_FILE_NOT_FOUND: u32 = 2;
const ERROR_NOT_A_REPARSE_POINT: u32 = 4390;

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(label: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("wclink_{label}_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> String {
        self.path.join(name).to_str().expect("utf-8 temp path").to_string()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn links() -> PlatformLinks {
    platform_links(&LinkConfig::default())
}

/// Symlink creation needs developer mode or elevation; skip without it.
fn try_symlink_file(target: &str, link: &str) -> bool {
    match std::os::windows::fs::symlink_file(target, link) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("skipping: cannot create symlink: {err}");
            false
        }
    }
}

#[test]
fn regular_file_is_not_a_link() {
    let dir = TempDir::new("regular");
    let file = dir.join("file.txt");
    fs::write(&file, b"x").unwrap();

    let links = links();
    assert!(!links.is_link(&file).unwrap());
    assert_eq!(links.resolve_real_path(&file).unwrap(), file);
}

#[test]
fn missing_path_is_a_lookup_error() {
    let dir = TempDir::new("missing");
    let path = dir.join("nope");
    assert_eq!(
        links().is_link(&path).unwrap_err(),
        LinkError::Lookup {
            path,
            code: ERROR_FILE_NOT_FOUND,
        }
    );
}

#[test]
fn read_link_on_regular_file_is_a_control_error() {
    let dir = TempDir::new("notlink");
    let file = dir.join("file.txt");
    fs::write(&file, b"x").unwrap();

    let err = links().read_link(&file).unwrap_err();
    assert!(matches!(err, LinkError::Control { .. }));
    assert_eq!(err.native_code(), Some(ERROR_NOT_A_REPARSE_POINT));
}

#[test]
fn absolute_symlink_round_trips() {
    let dir = TempDir::new("absolute");
    let target = dir.join("target.txt");
    let link = dir.join("link.txt");
    fs::write(&target, b"x").unwrap();
    if !try_symlink_file(&target, &link) {
        return;
    }

    let links = links();
    assert!(links.is_link(&link).unwrap());
    assert_eq!(links.read_link(&link).unwrap(), target);
    assert_eq!(links.resolve_real_path(&link).unwrap(), target);

    let data = links.read_reparse_data(&link).unwrap();
    assert_eq!(data.tag(), ReparseTag::Symlink);
    assert!(!data.is_relative());
    assert!(data.substitute_name().ends_with("target.txt"));
}

#[test]
fn relative_symlink_chain_resolves() {
    let dir = TempDir::new("chain");
    fs::create_dir(dir.join("sub")).unwrap();
    fs::write(dir.join("real.txt"), b"x").unwrap();
    if !try_symlink_file("..\\real.txt", &dir.join("sub\\two.txt")) {
        return;
    }
    if !try_symlink_file("sub\\two.txt", &dir.join("one.txt")) {
        return;
    }

    let links = links();
    assert_eq!(links.read_link(&dir.join("one.txt")).unwrap(), "sub\\two.txt");
    assert!(matches!(
        links.read_reparse_data(&dir.join("one.txt")).unwrap(),
        ReparseData::Symlink { .. }
    ));
    assert_eq!(
        links.resolve_real_path(&dir.join("one.txt")).unwrap(),
        dir.join("real.txt")
    );
}
