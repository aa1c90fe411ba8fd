// Tab and search filtering over the task sequence

use crate::task::Task;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Completion tab selecting which tasks are displayed
///
/// Serializes as `ALL`/`TODO`/`FINISHED`; deserializes through [`FromStr`], so
/// config files accept the same case-insensitive names as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tab {
    #[default]
    All, // every task
    Todo, // unfinished only
    Finished, // finished only
}

impl Tab {
    pub const ALL_TABS: [Tab; 3] = [Tab::All, Tab::Todo, Tab::Finished];

    /// Whether a task with this completion flag belongs on the tab
    pub fn admits(self, is_finished: bool) -> bool {
        match self {
            Tab::All => true,
            Tab::Todo => !is_finished,
            Tab::Finished => is_finished,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::All => write!(f, "ALL"),
            Tab::Todo => write!(f, "TODO"),
            Tab::Finished => write!(f, "FINISHED"),
        }
    }
}

/// Error for an unrecognised tab name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab '{0}', expected all, todo or finished")]
pub struct ParseTabError(pub String);

impl FromStr for Tab {
    type Err = ParseTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "todo" => Ok(Tab::Todo),
            "finished" => Ok(Tab::Finished),
            _ => Err(ParseTabError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Tab {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Tab plus free-text query, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Completion tab
    pub tab: Tab,
    /// Search text; surrounding whitespace and case are ignored
    pub query: String,
}

impl Filter {
    pub fn new(tab: Tab, query: impl Into<String>) -> Self {
        Self {
            tab,
            query: query.into(),
        }
    }

    /// Whether a single task passes both predicates
    pub fn matches(&self, task: &Task) -> bool {
        if !self.tab.admits(task.is_finished) {
            return false;
        }

        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.trim().to_lowercase().contains(&needle)
    }

    /// Order-preserving subsequence of `tasks` that passes the filter
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Project the full task sequence onto what the user currently sees
///
/// Drops tasks excluded by `tab`, then keeps only titles containing `query`
/// (case-insensitive, trimmed). Relative order is preserved and the input is
/// not modified.
pub fn filter<'a>(tasks: &'a [Task], tab: Tab, query: &str) -> Vec<&'a Task> {
    Filter::new(tab, query).apply(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn task(title: &str, finished: bool) -> Task {
        let mut task = Task::new(title).unwrap();
        if finished {
            task.toggle();
        }
        task
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    fn mixed() -> Vec<Task> {
        vec![
            task("Setup structure", true),
            task("Render a list of tasks", false),
            task("Add a new task", false),
            task("Ship it", true),
        ]
    }

    #[test]
    fn test_tab_exclusivity() {
        let tasks = mixed();

        let todo = filter(&tasks, Tab::Todo, "");
        let finished = filter(&tasks, Tab::Finished, "");
        let all = filter(&tasks, Tab::All, "");

        assert!(todo.iter().all(|t| !t.is_finished));
        assert!(finished.iter().all(|t| t.is_finished));

        let union: HashSet<_> = todo.iter().chain(finished.iter()).map(|t| t.id).collect();
        let every: HashSet<_> = all.iter().map(|t| t.id).collect();
        assert_eq!(union, every);
        assert_eq!(todo.len() + finished.len(), all.len());
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let tasks = vec![task("Buy Milk", false), task("clean house", false), task("BUY bread", false)];

        let result = filter(&tasks, Tab::All, "buy");
        assert_eq!(titles(&result), vec!["Buy Milk", "BUY bread"]);
    }

    #[test]
    fn test_search_ignores_surrounding_whitespace() {
        let tasks = vec![task("Buy Milk", false), task("clean house", false)];

        let result = filter(&tasks, Tab::All, "  HOUSE \t");
        assert_eq!(titles(&result), vec!["clean house"]);
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let tasks = mixed();

        let result = filter(&tasks, Tab::All, "");
        assert_eq!(result.len(), tasks.len());
        assert!(result.iter().zip(tasks.iter()).all(|(a, b)| a.id == b.id));

        let blank = filter(&tasks, Tab::All, "   ");
        assert_eq!(blank.len(), tasks.len());
    }

    #[test]
    fn test_tab_and_query_combine() {
        let tasks = mixed();

        let result = filter(&tasks, Tab::Todo, "task");
        assert_eq!(titles(&result), vec!["Render a list of tasks", "Add a new task"]);

        let result = filter(&tasks, Tab::Finished, "task");
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_struct_matches_free_function() {
        let tasks = mixed();
        for tab in Tab::ALL_TABS {
            for query in ["", "s", "SHIP", "nothing"] {
                let by_struct = Filter::new(tab, query).apply(&tasks);
                let by_fn = filter(&tasks, tab, query);
                assert_eq!(titles(&by_struct), titles(&by_fn), "tab={tab} query={query:?}");
            }
        }
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("all".parse::<Tab>().unwrap(), Tab::All);
        assert_eq!("TODO".parse::<Tab>().unwrap(), Tab::Todo);
        assert_eq!(" Finished ".parse::<Tab>().unwrap(), Tab::Finished);
        assert!("later".parse::<Tab>().is_err());
        assert!("done".parse::<Tab>().is_err());
    }

    #[test]
    fn test_tab_display() {
        assert_eq!(Tab::All.to_string(), "ALL");
        assert_eq!(Tab::Todo.to_string(), "TODO");
        assert_eq!(Tab::Finished.to_string(), "FINISHED");
    }

    #[test]
    fn test_tab_serialization() {
        assert_eq!(serde_json::to_string(&Tab::Todo).unwrap(), "\"TODO\"");
        let tab: Tab = serde_json::from_str("\"finished\"").unwrap();
        assert_eq!(tab, Tab::Finished);
    }

    #[test]
    fn test_tab_deserialize_matches_parse() {
        for name in ["all", "ALL", "Todo", "tOdO", " Finished "] {
            let json = serde_json::to_string(name).unwrap();
            let from_serde: Tab = serde_json::from_str(&json).unwrap();
            assert_eq!(from_serde, name.parse::<Tab>().unwrap(), "name={name:?}");
        }
        assert!(serde_json::from_str::<Tab>("\"done\"").is_err());
    }
}
