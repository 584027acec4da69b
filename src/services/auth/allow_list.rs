use std::collections::HashSet;
use std::sync::Arc;

/// Request paths exempt from authentication.
///
/// Built once at startup and never mutated. Membership is exact string
/// equality: no prefix, pattern or trailing-slash matching.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    paths: Arc<HashSet<String>>,
}

impl AllowList {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: Arc::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    pub fn contains(&self, target: &str) -> bool {
        self.paths.contains(target)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
