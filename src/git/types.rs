/// Commit counts of a branch relative to its upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AheadBehind {
    /// Commits on the branch that the upstream lacks
    pub ahead: u64,
    /// Commits on the upstream that the branch lacks
    pub behind: u64,
}

impl AheadBehind {
    pub fn is_in_sync(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }
}
