use crate::error::LinkError;

/// POSIX-style link operations over a platform backend.
///
/// Backends supply the primitives; the chain-following loop of
/// [`LinkResolver::resolve_real_path`] is shared so every backend has the
/// same termination and error behavior.
pub trait LinkResolver: Send + Sync {
    fn is_link(&self, path: &str) -> Result<bool, LinkError>;

    /// Returns the stored target of `path` verbatim.
    fn read_link(&self, path: &str) -> Result<String, LinkError>;

    /// Turns a target read from `link` into the next path to probe.
    fn rebase(&self, link: &str, target: &str) -> Result<String, LinkError>;

    /// Maximum number of links followed by one resolution; `None` is
    /// unbounded and loops forever on a cycle.
    fn max_hops(&self) -> Option<usize>;

    /// Follows `path` through links until it names a non-link.
    ///
    /// The first failure aborts the walk; intermediate hops are never
    /// returned.
    fn resolve_real_path(&self, path: &str) -> Result<String, LinkError> {
        let limit = self.max_hops();
        let mut hops = 0usize;
        let mut state = ResolveState::Probing(path.to_string());
        loop {
            state = match state {
                ResolveState::Probing(current) => match self.is_link(&current) {
                    Ok(true) => ResolveState::Reading(current),
                    Ok(false) => ResolveState::Done(current),
                    Err(err) => ResolveState::Failed(err),
                },
                ResolveState::Reading(current) => match limit {
                    Some(limit) if hops >= limit => {
                        log::warn!("giving up on `{path}` after {hops} links");
                        ResolveState::Failed(LinkError::TooManyHops {
                            path: path.to_string(),
                            limit,
                        })
                    }
                    _ => match self.read_link(&current) {
                        Ok(target) => ResolveState::Normalizing {
                            link: current,
                            target,
                        },
                        Err(err) => ResolveState::Failed(err),
                    },
                },
                ResolveState::Normalizing { link, target } => {
                    hops += 1;
                    log::trace!("hop {hops}: `{link}` -> `{target}`");
                    match self.rebase(&link, &target) {
                        Ok(next) => ResolveState::Probing(next),
                        Err(err) => ResolveState::Failed(err),
                    }
                }
                ResolveState::Done(resolved) => {
                    log::debug!("resolved `{path}` to `{resolved}` in {hops} hops");
                    return Ok(resolved);
                }
                ResolveState::Failed(err) => return Err(err),
            };
        }
    }
}

enum ResolveState {
    Probing(String),
    Reading(String),
    Normalizing { link: String, target: String },
    Done(String),
    Failed(LinkError),
}
