//! Filesystem autocomplete for the path fields.

use std::path::{Path, PathBuf};

/// Maximum number of path suggestions to display.
pub const MAX_SUGGESTIONS: usize = 8;

/// A single path suggestion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSuggestion {
    /// The full path, with `~` already expanded.
    pub full_path: String,
    /// Just the last component, for display.
    pub name: String,
    pub is_dir: bool,
}

#[derive(Debug, Default)]
pub struct PathSuggestions {
    items: Vec<PathSuggestion>,
    /// Highlighted entry, if the user has moved into the list.
    index: Option<usize>,
    /// Input the current items were computed for.
    computed_for: String,
}

impl PathSuggestions {
    pub fn items(&self) -> &[PathSuggestion] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.index
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index = None;
        self.computed_for.clear();
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.index = Some(match self.index {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    pub fn select_prev(&mut self) {
        self.index = match self.index {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// The path the highlighted entry completes to. Directories get a trailing
    /// slash so the user can keep drilling down.
    pub fn accept(&self) -> Option<String> {
        let suggestion = self.items.get(self.index?)?;
        let mut path = suggestion.full_path.clone();
        if suggestion.is_dir && !path.ends_with('/') {
            path.push('/');
        }
        Some(path)
    }

    /// Recompute suggestions for `input`. Cheap when the input is unchanged.
    pub fn refresh(&mut self, input: &str) {
        if input == self.computed_for {
            return;
        }
        self.computed_for = input.to_string();
        self.index = None;
        self.items = list_candidates(input);
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(input: &str) -> PathBuf {
    match input.strip_prefix('~') {
        Some(rest) => match dirs::home_dir() {
            Some(home) => PathBuf::from(home.to_string_lossy().to_string() + rest),
            None => PathBuf::from(input),
        },
        None => PathBuf::from(input),
    }
}

fn list_candidates(input: &str) -> Vec<PathSuggestion> {
    if input.is_empty() {
        return Vec::new();
    }

    let expanded = expand_tilde(input);
    let ends_with_sep = input.ends_with('/') || input.ends_with(std::path::MAIN_SEPARATOR);

    // With a trailing slash, list the directory itself; otherwise list the
    // parent and filter by the partial file name.
    let (search_dir, prefix): (PathBuf, String) = if ends_with_sep {
        (expanded, String::new())
    } else {
        let parent = expanded
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_prefix = expanded
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        (parent.to_path_buf(), file_prefix)
    };

    let Ok(entries) = std::fs::read_dir(&search_dir) else {
        return Vec::new();
    };

    let prefix_lower = prefix.to_lowercase();

    let mut results: Vec<PathSuggestion> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();

            // Hidden entries only when the user is typing a dot.
            if name.starts_with('.') && !prefix.starts_with('.') {
                return None;
            }
            if !name.to_lowercase().starts_with(&prefix_lower) {
                return None;
            }

            let full_path = entry.path();
            Some(PathSuggestion {
                is_dir: full_path.is_dir(),
                full_path: full_path.to_string_lossy().to_string(),
                name,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    results.truncate(MAX_SUGGESTIONS);
    results
}
