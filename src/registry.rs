//! In-memory task list.
//!
//! Tasks are plain description strings kept in insertion order. Identity is
//! exact text equality and duplicates are allowed.

/// Ordered collection of task descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRegistry {
    tasks: Vec<String>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Duplicates are kept.
    pub fn add(&mut self, task: impl Into<String>) {
        self.tasks.push(task.into());
    }

    /// Remove the first exact match. Returns `false` when absent.
    pub fn remove(&mut self, task: &str) -> bool {
        match self.tasks.iter().position(|t| t == task) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` when `task` is present verbatim.
    pub fn contains(&self, task: &str) -> bool {
        self.tasks.iter().any(|t| t == task)
    }

    /// Current tasks in insertion order.
    pub fn list(&self) -> &[String] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl From<Vec<String>> for TaskRegistry {
    fn from(tasks: Vec<String>) -> Self {
        Self { tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let mut registry = TaskRegistry::new();
        registry.add("milk");
        registry.add("bread");
        registry.add("milk");

        assert_eq!(registry.list(), ["milk", "bread", "milk"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn remove_takes_only_first_match() {
        let mut registry = TaskRegistry::from(vec![
            "milk".to_owned(),
            "bread".to_owned(),
            "milk".to_owned(),
        ]);

        assert!(registry.remove("milk"));
        assert_eq!(registry.list(), ["bread", "milk"]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut registry = TaskRegistry::from(vec!["milk".to_owned()]);

        assert!(!registry.remove("mil"));
        assert!(!registry.remove("milk "));
        assert_eq!(registry.list(), ["milk"]);
    }

    #[test]
    fn contains_is_exact() {
        let registry = TaskRegistry::from(vec!["buy milk".to_owned()]);
        assert!(registry.contains("buy milk"));
        assert!(!registry.contains("milk"));
        assert!(!TaskRegistry::new().contains(""));
    }
}
