use wclink::pathname::{dirname, is_absolute, join, normalize, parse_root, rebase, RootKind};
use wclink::LinkError;

#[test]
fn absolute_paths_need_a_drive_or_share() {
    assert!(is_absolute("C:\\a"));
    assert!(is_absolute("c:/a"));
    assert!(is_absolute("\\\\server\\share\\a"));
    assert!(is_absolute("\\\\?\\C:\\a"));
    assert!(!is_absolute("\\a"));
    assert!(!is_absolute("C:a"));
    assert!(!is_absolute("..\\a"));
    assert!(!is_absolute(""));
}

#[test]
fn root_classification() {
    assert_eq!(parse_root("C:\\a\\b"), (RootKind::Drive('C'), "a\\b"));
    assert_eq!(parse_root("d:x"), (RootKind::DriveRelative('D'), "x"));
    assert_eq!(parse_root("\\x"), (RootKind::Rooted, "x"));
    assert_eq!(parse_root("x\\y"), (RootKind::Relative, "x\\y"));
    assert_eq!(
        parse_root("\\\\server\\share\\dir"),
        (
            RootKind::Unc {
                server: "server".to_string(),
                share: "share".to_string()
            },
            "dir"
        )
    );
}

#[test]
fn dirname_strips_last_component() {
    assert_eq!(dirname("C:\\a\\b\\link"), "C:\\a\\b");
    assert_eq!(dirname("C:\\link"), "C:\\");
    assert_eq!(dirname("C:\\a\\\\link"), "C:\\a");
    assert_eq!(dirname("C:link"), "C:");
    assert_eq!(dirname("link"), "");
    assert_eq!(dirname("a/b"), "a");
    assert_eq!(dirname("\\\\server\\share\\link"), "\\\\server\\share\\");
}

#[test]
fn join_respects_anchors() {
    assert_eq!(join("C:\\a", "b"), "C:\\a\\b");
    assert_eq!(join("C:\\a\\", "b"), "C:\\a\\b");
    assert_eq!(join("C:\\a", "D:\\b"), "D:\\b");
    assert_eq!(join("C:\\a", "\\b"), "C:\\b");
    assert_eq!(join("C:", "b"), "C:b");
    assert_eq!(join("\\\\srv\\sh", "b"), "\\\\srv\\sh\\b");
    assert_eq!(join("", "b"), "b");
}

#[test]
fn normalize_folds_dots_and_separators() {
    assert_eq!(normalize("C:\\a\\b\\..\\sibling").unwrap(), "C:\\a\\sibling");
    assert_eq!(normalize("C:/a//./b/").unwrap(), "C:\\a\\b");
    assert_eq!(normalize("C:\\..\\..\\a").unwrap(), "C:\\a");
    assert_eq!(normalize("..\\a\\..\\..\\b").unwrap(), "..\\..\\b");
    assert_eq!(normalize("a\\..").unwrap(), ".");
    assert_eq!(normalize("\\\\srv\\sh\\x\\..").unwrap(), "\\\\srv\\sh\\");
    assert_eq!(normalize("\\\\?\\C:\\a\\..\\b").unwrap(), "\\\\?\\C:\\a\\..\\b");
}

#[test]
fn normalize_rejects_oversized_input() {
    let long = "a\\".repeat(20 * 1024);
    assert!(matches!(normalize(&long), Err(LinkError::InvalidPath { .. })));
}

#[test]
fn rebase_joins_relative_targets_to_link_directory() {
    assert_eq!(rebase("C:\\a\\b\\link", "..\\sibling").unwrap(), "C:\\a\\sibling");
    assert_eq!(rebase("C:\\a\\b\\link", "same").unwrap(), "C:\\a\\b\\same");
    assert_eq!(rebase("C:\\a\\link", "E:\\x\\..\\y").unwrap(), "E:\\x\\..\\y");
    assert_eq!(rebase("link", "other").unwrap(), "other");
}
