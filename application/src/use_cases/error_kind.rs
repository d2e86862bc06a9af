//! Error classification shared by every use case

/// How an error is reported back to the actor
///
/// | Kind | Meaning | State mutated? |
/// |------|---------|----------------|
/// | Validation | bad target, missing permission, malformed input | no |
/// | Conflict | a vote is already running for the target | no |
/// | NotFound | no active vote for the target | no |
/// | ExternalAction | a platform call failed | bookkeeping still completes |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    ExternalAction,
}

impl ErrorKind {
    /// Whether the failure is the actor's to fix (as opposed to ours)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ErrorKind::ExternalAction)
    }
}
