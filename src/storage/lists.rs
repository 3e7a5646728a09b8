use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Persisted mapping of category name to the starred repositories filed under
/// it. Loaded whole at startup, mutated in memory during a run, written back
/// whole at the end. A repository name appears in at most one category.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: BTreeMap<String, Vec<String>>,
    // Every assigned repository name, so the "already categorized" check does
    // not rescan all lists per item.
    assigned: HashSet<String>,
}

impl CategoryStore {
    /// Read the store from disk. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let categories: BTreeMap<String, Vec<String>> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(path)?)?
        } else {
            BTreeMap::new()
        };

        let assigned = categories.values().flatten().cloned().collect();

        Ok(Self {
            categories,
            assigned,
        })
    }

    /// Overwrite the file with the whole store, pretty-printed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.categories)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Whether the repository is already filed under any category.
    pub fn contains(&self, full_name: &str) -> bool {
        self.assigned.contains(full_name)
    }

    /// File a repository under `suggested`, or under `fallback` when the
    /// category would have to be created and creation is disabled. Returns
    /// the category the repository actually landed in.
    pub fn assign(
        &mut self,
        suggested: &str,
        full_name: &str,
        allow_new: bool,
        fallback: &str,
    ) -> String {
        let category = if allow_new || self.categories.contains_key(suggested) {
            suggested
        } else {
            fallback
        };

        self.categories
            .entry(category.to_string())
            .or_default()
            .push(full_name.to_string());
        self.assigned.insert(full_name.to_string());

        category.to_string()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn repo_count(&self) -> usize {
        self.assigned.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(category: &str, repos: &[&str]) -> CategoryStore {
        let mut store = CategoryStore::default();
        for repo in repos {
            store.assign(category, repo, true, "Uncategorised");
        }
        store
    }

    #[test]
    fn test_append_to_existing_category() {
        let mut store = store_with("Tooling", &["a/b"]);
        let assigned = store.assign("Tooling", "c/d", false, "Uncategorised");

        assert_eq!(assigned, "Tooling");
        let (_, repos) = store.categories().next().unwrap();
        assert_eq!(repos, &["a/b", "c/d"]);
    }

    #[test]
    fn test_new_category_created_when_allowed() {
        let mut store = store_with("Tooling", &["a/b"]);
        let assigned = store.assign("Databases", "c/d", true, "Uncategorised");

        assert_eq!(assigned, "Databases");
        assert_eq!(store.category_count(), 2);
    }

    #[test]
    fn test_new_category_redirects_to_fallback_when_disallowed() {
        let mut store = store_with("Tooling", &["a/b"]);
        let assigned = store.assign("Databases", "c/d", false, "Uncategorised");

        assert_eq!(assigned, "Uncategorised");
        assert!(store.contains("c/d"));
        assert!(!store.categories().any(|(name, _)| name == "Databases"));
    }

    #[test]
    fn test_contains_tracks_assignments() {
        let mut store = CategoryStore::default();
        assert!(!store.contains("a/b"));

        store.assign("Tooling", "a/b", true, "Uncategorised");
        assert!(store.contains("a/b"));
        assert_eq!(store.repo_count(), 1);
    }

    #[test]
    fn test_each_repo_in_exactly_one_category() {
        let mut store = CategoryStore::default();
        store.assign("Tooling", "a/b", true, "Uncategorised");
        store.assign("Databases", "c/d", true, "Uncategorised");
        store.assign("Unknown", "e/f", false, "Uncategorised");

        for repo in ["a/b", "c/d", "e/f"] {
            let occurrences: usize = store
                .categories()
                .map(|(_, repos)| repos.iter().filter(|r| *r == repo).count())
                .sum();
            assert_eq!(occurrences, 1, "{} filed more than once", repo);
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CategoryStore::load(dir.path().join("lists.json")).unwrap();

        assert_eq!(store.category_count(), 0);
        assert_eq!(store.repo_count(), 0);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.json");

        let mut store = store_with("Tooling", &["a/b"]);
        store.assign("Databases", "c/d", true, "Uncategorised");
        store.save(&path).unwrap();

        let reloaded = CategoryStore::load(&path).unwrap();
        assert!(reloaded.contains("a/b"));
        assert!(reloaded.contains("c/d"));
        assert_eq!(reloaded.category_count(), 2);

        // Saving an untouched reload produces the same document.
        let first = fs::read_to_string(&path).unwrap();
        reloaded.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_saved_file_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.json");

        store_with("Tooling", &["a/b"]).save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  \"Tooling\""));
    }
}
