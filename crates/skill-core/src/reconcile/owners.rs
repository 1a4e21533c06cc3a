//! Run-wide destination ownership

use std::collections::HashMap;

use crate::{Error, Result};

/// Maps each mirror destination (`skill/<name>`) to the repository that
/// claimed it during the current run.
#[derive(Debug, Clone, Default)]
pub struct OwnerMap {
    owners: HashMap<String, String>,
}

impl OwnerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner of `destination`, if any.
    pub fn owner(&self, destination: &str) -> Option<&str> {
        self.owners.get(destination).map(String::as_str)
    }

    /// Whether `repo` may occupy `destination`.
    pub fn is_available(&self, destination: &str, repo: &str) -> bool {
        self.owner(destination).is_none_or(|owner| owner == repo)
    }

    /// Fail if `destination` belongs to a repository other than `repo`.
    pub fn check(&self, destination: &str, repo: &str) -> Result<()> {
        match self.owner(destination) {
            Some(owner) if owner != repo => Err(Error::PathOwned {
                path: destination.to_string(),
                owner: owner.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Record `repo` as the owner of `destination`.
    pub fn claim(&mut self, destination: &str, repo: &str) -> Result<()> {
        self.check(destination, repo)?;
        self.owners
            .insert(destination.to_string(), repo.to_string());
        Ok(())
    }
}
