/// Reported where the host has no notion of user ids.
pub const ROOT_UID: u32 = 0;

#[cfg(unix)]
pub fn effective_user_id() -> u32 {
    unsafe { libc::geteuid() }
}

#[cfg(not(unix))]
pub fn effective_user_id() -> u32 {
    ROOT_UID
}
