//! Integration tests for the git command adapter.
//!
//! Each test builds a throw-away repository in a temp dir with the real `git`
//! binary. Tests return early when git is not installed.

use std::path::Path;
use std::process::Command;

use diffr_core::{Error, GitCli, HistorySource, PagerCommand};
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A scratch repository isolated from the user's global git config.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let repo = Self { dir: TempDir::new().unwrap() };
        repo.git(&["init", "-q"]);
        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(["-c", "user.name=diffr", "-c", "user.email=diffr@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(self.path())
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("HOME", self.path())
            .output()
            .unwrap();
        assert!(output.status.success(), "git {args:?} failed: {output:?}");
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
    }

    fn cli(&self, pager: Option<PagerCommand>) -> GitCli {
        GitCli::discover(self.path(), pager).unwrap()
    }
}

/// Two commits: `first` adds a.txt, `second` edits it and adds src/b.txt.
fn two_commit_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write("a.txt", "first line\n");
    repo.commit("first");
    repo.write("a.txt", "first line\nsecond line\n");
    repo.write("src/b.txt", "hello\n");
    repo.commit("second");
    repo
}

#[test]
fn commits_are_listed_most_recent_first() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let commits = repo.cli(None).commits().unwrap();

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, ["second", "first"]);
    assert!(commits.iter().all(|c| !c.hash.is_empty()), "every commit should carry a hash");
}

#[test]
fn head_of_clean_tree_has_no_changed_files() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let cli = repo.cli(None);
    let head = &cli.commits().unwrap()[0];

    assert_eq!(cli.changed_files(&head.hash).unwrap(), Vec::<String>::new());
}

#[test]
fn older_commit_lists_files_changed_since() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let cli = repo.cli(None);
    let first = &cli.commits().unwrap()[1];

    assert_eq!(cli.changed_files(&first.hash).unwrap(), ["a.txt", "src/b.txt"]);
}

#[test]
fn unknown_hash_is_a_command_failure_not_an_empty_list() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let err = repo.cli(None).changed_files("0000000deadbeef").unwrap_err();

    assert!(matches!(err, Error::CommandFailed { .. }), "got {err:?}");
}

#[test]
fn diff_without_pager_is_raw_git_output() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let cli = repo.cli(None);
    let first = cli.commits().unwrap()[1].clone();

    let diff = cli.diff(&first.hash, "a.txt").unwrap();
    assert!(!diff.paged);
    assert!(diff.text.contains("diff --git a/a.txt b/a.txt"));
    assert!(diff.text.contains("+second line"));
    assert!(!diff.text.contains("src/b.txt"), "diff must be limited to the chosen file");
}

#[cfg(unix)]
#[test]
fn diff_is_piped_through_pager_verbatim() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let pager = PagerCommand::from_program("cat", Vec::new());
    let cli = repo.cli(pager);
    let first = cli.commits().unwrap()[1].clone();

    let diff = cli.diff(&first.hash, "a.txt").unwrap();
    assert!(diff.paged);
    assert!(diff.text.contains("+second line"));
}

#[test]
fn missing_pager_falls_back_to_raw_diff() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let pager = PagerCommand::from_program("diffr-test-no-such-pager", Vec::new());
    let cli = repo.cli(pager);
    let first = cli.commits().unwrap()[1].clone();

    let diff = cli.diff(&first.hash, "a.txt").unwrap();
    assert!(!diff.paged, "fallback output must be flagged as unpaged");
    assert!(diff.text.contains("+second line"));
}

#[test]
fn file_names_are_not_interpreted_by_a_shell() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let cli = repo.cli(None);
    let first = cli.commits().unwrap()[1].clone();

    let diff = cli.diff(&first.hash, "a.txt; touch pwned").unwrap();
    assert!(diff.text.is_empty());
    assert!(!repo.path().join("pwned").exists());
}

#[test]
fn discover_from_subdirectory_binds_to_repository_root() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let cli = GitCli::discover(&repo.path().join("src"), None).unwrap();

    assert_eq!(
        cli.workdir().canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[test]
fn discover_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let err = GitCli::discover(dir.path(), None).unwrap_err();

    assert!(matches!(err, Error::Repository(_)), "got {err:?}");
}

#[test]
fn non_ascii_and_spaced_paths_round_trip_into_the_diff() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.write("café.txt", "un\n");
    repo.write("with space.md", "one\n");
    repo.commit("first");
    repo.write("café.txt", "un\ndeux\n");
    repo.write("with space.md", "one\ntwo\n");
    repo.commit("second");

    let cli = repo.cli(None);
    let first = cli.commits().unwrap()[1].clone();
    let files = cli.changed_files(&first.hash).unwrap();
    assert_eq!(files, ["café.txt", "with space.md"]);

    let accented = cli.diff(&first.hash, &files[0]).unwrap();
    assert!(accented.text.contains("+deux"), "got {:?}", accented.text);
    let spaced = cli.diff(&first.hash, &files[1]).unwrap();
    assert!(spaced.text.contains("+two"), "got {:?}", spaced.text);
}

#[cfg(unix)]
#[test]
fn failing_pager_is_a_command_failure() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    let pager = PagerCommand::from_program("false", Vec::new());
    let cli = repo.cli(pager);
    let first = cli.commits().unwrap()[1].clone();

    let err = cli.diff(&first.hash, "a.txt").unwrap_err();
    match err {
        Error::CommandFailed { command, code, .. } => {
            assert_eq!(command, "false");
            assert_ne!(code, 0);
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn external_diff_driver_in_repo_config_is_ignored() {
    if !git_available() {
        return;
    }
    let repo = two_commit_repo();
    repo.git(&["config", "diff.external", "echo"]);
    let cli = repo.cli(None);
    let first = cli.commits().unwrap()[1].clone();

    let diff = cli.diff(&first.hash, "a.txt").unwrap();
    assert!(diff.text.contains("diff --git a/a.txt b/a.txt"), "got {:?}", diff.text);
    assert!(diff.text.contains("+second line"));
}

#[test]
fn repository_without_commits_has_empty_history() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.write("draft.txt", "wip\n");

    assert!(repo.cli(None).commits().unwrap().is_empty());
}
