use anyhow::{Context, Result};
use git2::{Repository, Signature, Time};
use std::fs;
use std::path::Path;

/// Commits new notes when the notes directory lives in a git repository
pub struct GitOps {
    repo: Option<Repository>,
}

impl GitOps {
    /// Detect the repository containing `base_dir`, if any
    pub fn new(base_dir: &Path) -> Self {
        let repo = Repository::discover(base_dir).ok();
        Self { repo }
    }

    /// Check if the notes directory is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    /// Stage `file_path` and commit it with `message`.
    ///
    /// Does nothing outside a repository.
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };

        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let workdir = fs::canonicalize(workdir).context("Failed to resolve repository path")?;
        let file_path = fs::canonicalize(file_path)
            .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
        let relative_path = file_path
            .strip_prefix(&workdir)
            .context("Note is not in repository")?;

        let mut index = repo.index()?;
        index.add_path(relative_path)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let parent_commit = match repo.head() {
            Ok(head) => {
                let oid = head.target().context("HEAD has no target")?;
                Some(repo.find_commit(oid)?)
            }
            Err(_) => None, // Initial commit
        };
        let parents: Vec<_> = parent_commit.iter().collect();

        let signature = Self::get_signature(repo)?;
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(())
    }

    fn get_signature(repo: &Repository) -> Result<Signature<'static>> {
        let config = repo.config()?;

        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "note".to_string());
        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "note@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            Err(_) => {
                // Some CI systems have no usable clock offset.
                let time = Time::new(1_700_000_000, 0);
                Signature::new(&name, &email, &time)
                    .context("Failed to create signature with fixed time")
            }
        }
    }
}
