//! Commit hook path: version-change detection and release tagging
//!
//! Runs once per recorded commit, after the fact. The descriptor diff
//! decides whether anything happens at all; the tag builder only runs on a
//! detected change. Nothing here can block or roll back the commit that
//! triggered it.

pub mod diff;
pub mod tag;
