//! Changeset sources
//!
//! A review consumes only `(path, status)` pairs. [`ChangesetSource`] hides
//! where they come from:
//!
//! - [`GitChangeset`]: base revision tree vs. working directory with index
//! - [`NameStatusChangeset`]: output of `git diff --name-status`
//! - [`StaticChangeset`]: a fixed list

use crate::error::ChangesetError;
use git2::{Delta, Repository};
use pool_item::{ChangedFile, DeltaStatus};
use std::path::{Path, PathBuf};

/// Produces the files changed in a pull request
pub trait ChangesetSource {
    /// Changed files, in source order
    ///
    /// # Errors
    /// Returns error if the changeset cannot be obtained
    fn changed_files(&self) -> Result<Vec<ChangedFile>, ChangesetError>;
}

/// Fixed changeset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticChangeset {
    files: Vec<ChangedFile>,
}

impl StaticChangeset {
    /// Create source returning these files
    #[inline]
    #[must_use]
    pub fn new(files: Vec<ChangedFile>) -> Self {
        Self { files }
    }
}

impl From<Vec<ChangedFile>> for StaticChangeset {
    fn from(files: Vec<ChangedFile>) -> Self {
        Self::new(files)
    }
}

impl ChangesetSource for StaticChangeset {
    fn changed_files(&self) -> Result<Vec<ChangedFile>, ChangesetError> {
        Ok(self.files.clone())
    }
}

/// libgit2 delta code for a delta kind
#[must_use]
pub fn delta_code(delta: Delta) -> i32 {
    match delta {
        Delta::Unmodified => 0,
        Delta::Added => 1,
        Delta::Deleted => 2,
        Delta::Modified => 3,
        Delta::Renamed => 4,
        Delta::Copied => 5,
        Delta::Ignored => 6,
        Delta::Untracked => 7,
        Delta::Typechange => 8,
        Delta::Unreadable => 9,
        Delta::Conflicted => 10,
    }
}

fn delta_status(delta: Delta) -> DeltaStatus {
    match delta {
        Delta::Added => DeltaStatus::Added,
        Delta::Modified => DeltaStatus::Modified,
        other => DeltaStatus::Unknown(delta_code(other)),
    }
}

/// Changes in a git working directory relative to a base revision
///
/// Staged and unstaged changes both count; untracked files do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitChangeset {
    repo: PathBuf,
    base_ref: String,
}

impl GitChangeset {
    /// Create source for the repository at `repo`, compared against `master`
    #[must_use]
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            base_ref: "master".to_string(),
        }
    }

    /// With base revision
    #[inline]
    #[must_use]
    pub fn with_base_ref(mut self, base_ref: impl Into<String>) -> Self {
        self.base_ref = base_ref.into();
        self
    }

    /// Repository path
    #[inline]
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Base revision
    #[inline]
    #[must_use]
    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }
}

impl ChangesetSource for GitChangeset {
    fn changed_files(&self) -> Result<Vec<ChangedFile>, ChangesetError> {
        let repo = Repository::open(&self.repo)
            .map_err(|_| ChangesetError::RepositoryNotFound(self.repo.clone()))?;

        let base_tree = repo
            .revparse_single(&self.base_ref)
            .and_then(|object| object.peel_to_tree())
            .map_err(|_| ChangesetError::BaseRefNotFound(self.base_ref.clone()))?;

        let diff = repo.diff_tree_to_workdir_with_index(Some(&base_tree), None)?;

        let files: Vec<ChangedFile> = diff
            .deltas()
            .filter_map(|delta| {
                let path = delta.new_file().path()?;
                Some(ChangedFile::new(
                    path.to_string_lossy(),
                    delta_status(delta.status()),
                ))
            })
            .collect();

        tracing::info!(
            "Found {} changed files in {} relative to {}",
            files.len(),
            self.repo.display(),
            self.base_ref
        );
        Ok(files)
    }
}

/// Changeset read from `git diff --name-status` output
///
/// Each line is a status letter (optionally followed by a similarity
/// score) and one or two tab-separated paths. For renames and copies the
/// new path is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameStatusChangeset {
    input: NameStatusInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameStatusInput {
    Text(String),
    File(PathBuf),
}

impl NameStatusChangeset {
    /// Create source from name-status text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            input: NameStatusInput::Text(text.into()),
        }
    }

    /// Create source reading name-status text from a file
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            input: NameStatusInput::File(path.into()),
        }
    }

    /// Parse name-status text
    ///
    /// # Errors
    /// Returns error on an unknown status letter or a line without a path
    pub fn parse(text: &str) -> Result<Vec<ChangedFile>, ChangesetError> {
        let mut files = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let mut fields = line.split('\t');
            let code = fields.next().unwrap_or_default().trim();
            let path = fields.last().map(str::trim).filter(|p| !p.is_empty());
            let Some(path) = path else {
                return Err(ChangesetError::Parse {
                    line: line_no,
                    message: format!("missing path after status '{code}'"),
                });
            };
            let status = status_from_letter(code).ok_or_else(|| ChangesetError::Parse {
                line: line_no,
                message: format!("unknown status '{code}'"),
            })?;
            files.push(ChangedFile::new(path, status));
        }
        Ok(files)
    }
}

fn status_from_letter(code: &str) -> Option<DeltaStatus> {
    let delta = match code.chars().next()? {
        'A' => Delta::Added,
        'M' => Delta::Modified,
        'D' => Delta::Deleted,
        'R' => Delta::Renamed,
        'C' => Delta::Copied,
        'T' => Delta::Typechange,
        'U' => Delta::Conflicted,
        'X' => Delta::Unreadable,
        _ => return None,
    };
    Some(delta_status(delta))
}

impl ChangesetSource for NameStatusChangeset {
    fn changed_files(&self) -> Result<Vec<ChangedFile>, ChangesetError> {
        match &self.input {
            NameStatusInput::Text(text) => Self::parse(text),
            NameStatusInput::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ChangesetError::Io {
                    path: path.clone(),
                    source,
                })?;
                let files = Self::parse(&text)?;
                tracing::info!("Read {} changed files from {}", files.len(), path.display());
                Ok(files)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_status_letters() {
        let files = NameStatusChangeset::parse(
            "A\tparts/new.json\nM\tunits/ne555.json\nD\tsymbols/old.json\nR100\tparts/a.json\tparts/b.json\n",
        )
        .unwrap();

        assert_eq!(
            files,
            vec![
                ChangedFile::added("parts/new.json"),
                ChangedFile::modified("units/ne555.json"),
                ChangedFile::new("symbols/old.json", DeltaStatus::Unknown(2)),
                ChangedFile::new("parts/b.json", DeltaStatus::Unknown(4)),
            ]
        );
    }

    #[test]
    fn name_status_skips_blank_lines() {
        let files = NameStatusChangeset::parse("\nA\ta.json\n\n").unwrap();
        assert_eq!(files, vec![ChangedFile::added("a.json")]);
    }

    #[test]
    fn name_status_rejects_unknown_letter() {
        let err = NameStatusChangeset::parse("A\ta.json\nZ\tb.json").unwrap_err();
        assert!(matches!(err, ChangesetError::Parse { line: 2, .. }));
    }

    #[test]
    fn name_status_rejects_missing_path() {
        let err = NameStatusChangeset::parse("M").unwrap_err();
        assert!(matches!(err, ChangesetError::Parse { line: 1, .. }));
    }

    #[test]
    fn name_status_missing_file_is_io_error() {
        let source = NameStatusChangeset::from_file("/nonexistent/changes.txt");
        assert!(matches!(source.changed_files(), Err(ChangesetError::Io { .. })));
    }

    fn commit_all(repo: &Repository, paths: &[&str]) {
        let mut index = repo.index().unwrap();
        for path in paths {
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Tester", "tester@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    #[test]
    fn git_changeset_sees_staged_and_modified_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        commit_all(&repo, &["a.json"]);

        std::fs::write(dir.path().join("a.json"), "{\"name\": \"changed\"}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("untracked.json"), "{}").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("b.json")).unwrap();
        index.write().unwrap();

        let files = GitChangeset::new(dir.path())
            .with_base_ref("HEAD")
            .changed_files()
            .unwrap();

        assert_eq!(
            files,
            vec![ChangedFile::modified("a.json"), ChangedFile::added("b.json")]
        );
    }

    #[test]
    fn git_changeset_unknown_base_ref() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        commit_all(&repo, &["a.json"]);

        let err = GitChangeset::new(dir.path())
            .with_base_ref("no-such-branch")
            .changed_files()
            .unwrap_err();
        assert!(matches!(err, ChangesetError::BaseRefNotFound(r) if r == "no-such-branch"));
    }

    #[test]
    fn git_changeset_without_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitChangeset::new(dir.path()).changed_files().unwrap_err();
        assert!(matches!(err, ChangesetError::RepositoryNotFound(_)));
    }

    #[test]
    fn static_changeset_returns_its_files() {
        let source = StaticChangeset::from(vec![ChangedFile::added("x.json")]);
        assert_eq!(source.changed_files().unwrap(), vec![ChangedFile::added("x.json")]);
    }
}
