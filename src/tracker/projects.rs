use std::{collections::BTreeSet, fmt::Display};

use anyhow::{bail, Result};

pub const DEFAULT_PROJECT: &str = "Project_1";

/// Ordered list of project names together with the project currently selected in the main
/// window. The list is never empty, so the selection always points at an existing project.
///
/// Duplicate names are allowed, which is why the selection is tracked by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRegistry {
    names: Vec<String>,
    selected: usize,
}

/// An entry of the project selector. Carries the position so that projects with the same name
/// can still be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOption {
    pub index: usize,
    pub name: String,
}

impl Display for ProjectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_PROJECT.to_owned()],
            selected: 0,
        }
    }
}

impl ProjectRegistry {
    /// Creates a registry from loaded names. Blank names are skipped and an empty list falls back
    /// to the default project.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let names = names
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect::<Vec<_>>();
        if names.is_empty() {
            Self::default()
        } else {
            Self { names, selected: 0 }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn selected(&self) -> &str {
        &self.names[self.selected]
    }

    pub fn selected_option(&self) -> ProjectOption {
        ProjectOption {
            index: self.selected,
            name: self.selected().to_owned(),
        }
    }

    /// Options for the project selector, rebuilt from the list on every call.
    pub fn options(&self) -> Vec<ProjectOption> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| ProjectOption {
                index,
                name: name.clone(),
            })
            .collect()
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.names.len() {
            bail!("Project {index} doesn't exist");
        }
        self.selected = index;
        Ok(())
    }

    /// Appends a project named after the next position, e.g. `Project_3` for a list of 2.
    pub fn add(&mut self) -> &str {
        let name = format!("Project {}", self.names.len() + 1).replace(' ', "_");
        self.names.push(name);
        &self.names[self.names.len() - 1]
    }

    /// Replaces the name at `index`. The name is stored as typed, only names made of nothing but
    /// whitespace are refused.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            bail!("Project name can't be empty");
        }
        match self.names.get_mut(index) {
            Some(v) => {
                *v = name.to_owned();
                Ok(())
            }
            None => bail!("Project {index} doesn't exist"),
        }
    }

    /// Removes projects at the given positions. Removing every project resets the list to
    /// [DEFAULT_PROJECT]. Returns amount of removed projects.
    pub fn delete(&mut self, indices: &BTreeSet<usize>) -> Result<usize> {
        if indices.is_empty() {
            bail!("No project selected for deletion");
        }

        let before = self.names.len();
        let selected_removed = indices.contains(&self.selected);
        let removed_before_selected = indices.range(..self.selected).count();

        let mut position = 0;
        self.names.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        let removed = before - self.names.len();

        if self.names.is_empty() {
            *self = Self::default();
        } else if selected_removed {
            self.selected = 0;
        } else {
            self.selected -= removed_before_selected;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{ProjectRegistry, DEFAULT_PROJECT};

    fn registry(names: &[&str]) -> ProjectRegistry {
        ProjectRegistry::new(names.iter().map(|v| v.to_string()))
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        assert_eq!(registry(&[]).names(), [DEFAULT_PROJECT]);
        assert_eq!(registry(&["", "  "]).names(), [DEFAULT_PROJECT]);
    }

    #[test]
    fn add_uses_next_position() {
        let mut projects = registry(&["Alpha", "Beta"]);
        assert_eq!(projects.add(), "Project_3");
        assert_eq!(projects.add(), "Project_4");
        assert_eq!(projects.names().len(), 4);
    }

    #[test]
    fn rename_keeps_count_and_updates_options() {
        let mut projects = registry(&["Alpha", "Beta", "Gamma"]);
        projects.rename(1, "Writing").unwrap();

        assert_eq!(projects.names().len(), 3);
        let options = projects
            .options()
            .into_iter()
            .map(|v| v.name)
            .collect::<Vec<_>>();
        assert_eq!(options, vec!["Alpha", "Writing", "Gamma"]);
    }

    #[test]
    fn rename_rejects_bad_input() {
        let mut projects = registry(&["Alpha"]);
        assert!(projects.rename(0, "   ").is_err());
        assert!(projects.rename(3, "Other").is_err());
        assert_eq!(projects.names(), ["Alpha"]);
    }

    #[test]
    fn rename_keeps_surrounding_whitespace() {
        let mut projects = registry(&["Alpha"]);
        projects.rename(0, " Alpha ").unwrap();
        assert_eq!(projects.names(), [" Alpha "]);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut projects = registry(&["Alpha", "Beta"]);
        projects.rename(1, "Alpha").unwrap();
        projects.select(1).unwrap();
        assert_eq!(projects.names(), ["Alpha", "Alpha"]);
        assert_eq!(projects.selected_option().index, 1);
    }

    #[test]
    fn deleting_everything_resets_to_default() {
        let mut projects = registry(&["Alpha", "Beta", "Gamma"]);
        projects.select(2).unwrap();

        let removed = projects.delete(&BTreeSet::from([0, 1, 2])).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(projects.names(), [DEFAULT_PROJECT]);
        assert_eq!(projects.selected(), DEFAULT_PROJECT);
    }

    #[test]
    fn deleting_selected_falls_back_to_first() {
        let mut projects = registry(&["Alpha", "Beta", "Gamma"]);
        projects.select(1).unwrap();

        projects.delete(&BTreeSet::from([1])).unwrap();

        assert_eq!(projects.selected(), "Alpha");
    }

    #[test]
    fn deleting_earlier_projects_keeps_selection() {
        let mut projects = registry(&["Alpha", "Beta", "Gamma", "Delta"]);
        projects.select(3).unwrap();

        projects.delete(&BTreeSet::from([0, 2])).unwrap();

        assert_eq!(projects.names(), ["Beta", "Delta"]);
        assert_eq!(projects.selected(), "Delta");
    }

    #[test]
    fn empty_deletion_is_an_error() {
        let mut projects = registry(&["Alpha"]);
        assert!(projects.delete(&BTreeSet::new()).is_err());
        assert_eq!(projects.names().len(), 1);
    }
}
