//! Command adapter around the `git` binary and the diff pager.
//!
//! Every call is a blocking `std::process::Command` run from the repository's
//! working directory. Arguments are always passed as an argv vector so commit
//! hashes and file paths never reach a shell.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use git2::{ErrorCode, Repository};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{CommitEntry, PagerCommand, RenderedDiff};

/// Field separator between hash and subject in the log format.
///
/// Short hashes are hex, so the token can never occur inside the hash field.
pub const SEPARATOR: &str = "{SEPARATOR}";

/// The three operations the selection UI needs from version control.
///
/// Implemented by [`GitCli`] for real repositories; tests substitute an
/// in-memory fake.
pub trait HistorySource {
    /// All commits, most recent first.
    fn commits(&self) -> Result<Vec<CommitEntry>>;
    /// Paths changed between `hash` and the working tree. May be empty.
    fn changed_files(&self, hash: &str) -> Result<Vec<String>>;
    /// Pager-rendered diff of `file` against `hash`.
    fn diff(&self, hash: &str, file: &str) -> Result<RenderedDiff>;
}

/// Parses `git log --pretty=format:%h{SEPARATOR}%s` output.
///
/// Blank lines are skipped. Any other line must split into a non-empty hash
/// and a non-empty subject, otherwise the whole parse fails with
/// [`Error::Parse`] and no partial list is returned.
pub fn parse_log(raw: &str) -> Result<Vec<CommitEntry>> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(SEPARATOR) {
            Some((hash, message)) if !hash.is_empty() && !message.is_empty() => {
                Ok(CommitEntry::new(hash, message))
            }
            _ => Err(Error::Parse { line: line.to_owned() }),
        })
        .collect()
}

/// Parses `git diff --name-only -z` output into repository-relative paths.
///
/// Entries are NUL-terminated and unquoted, so names with spaces, newlines or
/// non-ASCII characters come back exactly as they appear in the work tree.
pub fn parse_file_list(raw: &str) -> Vec<String> {
    raw.split('\0')
        .filter(|path| !path.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs git (and the pager) inside one repository's working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    pager: Option<PagerCommand>,
}

impl GitCli {
    /// Locates the repository containing `path` and binds to its working tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Repository`] when `path` is not inside a repository or
    /// the repository is bare.
    pub fn discover(path: &Path, pager: Option<PagerCommand>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("bare repository has no working tree"))?
            .to_path_buf();
        debug!(workdir = %workdir.display(), "discovered repository");
        Ok(Self { workdir, pager })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn pager(&self) -> Option<&PagerCommand> {
        self.pager.as_ref()
    }

    /// `false` for a freshly initialised repository whose branch is unborn.
    fn has_commits(&self) -> Result<bool> {
        match Repository::open(&self.workdir)?.head() {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Runs `git <args>` and returns stdout, failing on a non-zero exit.
    fn run_git(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn { program: "git".to_owned(), source })?;
        let command = format!("git {}", args.join(" "));
        check_status(command, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Streams `raw` through the pager and returns what it prints.
    ///
    /// Returns `Ok(None)` when the pager program is not installed.
    fn page(&self, pager: &PagerCommand, raw: &str) -> Result<Option<String>> {
        debug!(program = %pager.program, "piping diff through pager");
        let spawned = Command::new(&pager.program)
            .args(&pager.args)
            .current_dir(&self.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::Spawn { program: pager.program.clone(), source }),
        };

        // Feed stdin from a separate thread: a pager that fills its stdout pipe
        // before draining stdin would otherwise deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = raw.to_owned();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child.wait_with_output()?;
        if let Some(Ok(Err(e))) = writer.map(|w| w.join()) {
            // A pager may legitimately exit before reading all of its input.
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        check_status(pager.program.clone(), &output)?;
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

impl HistorySource for GitCli {
    fn commits(&self) -> Result<Vec<CommitEntry>> {
        if !self.has_commits()? {
            debug!("repository has no commits yet");
            return Ok(Vec::new());
        }
        let format = format!("--pretty=format:%h{}%s", SEPARATOR);
        let raw =
            self.run_git(&["log", "--no-color", "--no-show-signature", format.as_str()])?;
        parse_log(&raw)
    }

    fn changed_files(&self, hash: &str) -> Result<Vec<String>> {
        let raw = self.run_git(&[
            "diff",
            "--no-color",
            "--no-ext-diff",
            "--name-only",
            "-z",
            hash,
            "--",
        ])?;
        Ok(parse_file_list(&raw))
    }

    fn diff(&self, hash: &str, file: &str) -> Result<RenderedDiff> {
        let raw = self.run_git(&["diff", "--no-color", "--no-ext-diff", hash, "--", file])?;
        let Some(pager) = &self.pager else {
            return Ok(RenderedDiff { text: raw, paged: false });
        };
        match self.page(pager, &raw)? {
            Some(text) => Ok(RenderedDiff { text, paged: true }),
            None => {
                warn!(program = %pager.program, "pager not found, showing raw diff");
                Ok(RenderedDiff { text: raw, paged: false })
            }
        }
    }
}

fn check_status(command: String, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
    let code = output.status.code().unwrap_or(-1);
    warn!(%command, code, %stderr, "command failed");
    Err(Error::CommandFailed { command, code, stderr })
}
