/// One row of `git log` output: an abbreviated hash and the commit subject.
///
/// Entries are produced once at startup by [`crate::git::GitCli::commits`] and
/// never mutated afterwards; the full list is the source of truth for the
/// commit selection panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntry {
    pub hash: String,    // short hash, `%h`
    pub message: String, // subject line, `%s`
}

impl CommitEntry {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self { hash: hash.into(), message: message.into() }
    }
}

/// Diff text for one `(commit, file)` pair, as produced by the pager.
///
/// The text is opaque: when `paged` is true it usually carries ANSI colour
/// escapes written by the pager. When the pager could not be started the raw
/// `git diff` output is returned instead and `paged` is false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedDiff {
    pub text: String,
    pub paged: bool,
}

/// External program the raw diff is piped through, e.g. `delta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PagerCommand {
    /// Builds a pager from a program name; an empty name disables paging.
    pub fn from_program(program: &str, args: Vec<String>) -> Option<Self> {
        let program = program.trim();
        if program.is_empty() {
            None
        } else {
            Some(Self { program: program.to_owned(), args })
        }
    }
}

impl Default for PagerCommand {
    fn default() -> Self {
        Self { program: "delta".to_owned(), args: Vec::new() }
    }
}
