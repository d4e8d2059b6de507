//! Version-control side of diffr: the commit lister, file lister and diff
//! renderer, all implemented by shelling out to `git` and a diff pager.

pub mod error;
pub mod git;
pub mod types;

pub use error::{Error, Result};
pub use git::{GitCli, HistorySource};
pub use types::{CommitEntry, PagerCommand, RenderedDiff};
