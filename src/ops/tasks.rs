use std::path::PathBuf;
use std::str::FromStr;

use crate::io::SearchHit;
use crate::model::task::Task;
use crate::ops::OpsError;
use crate::parse::{ParseError, parse_task};

/// Sort order for the task picker, lower first. Keyed by status keyword.
const STATUS_PRIORITY: &[(&str, u8)] = &[
    ("focus", 0),
    ("in_progress", 10),
    ("next", 20),
    ("someday", 50),
    ("done", 90),
    ("wontfix", 99),
];

/// Unrecognized checkboxes sort between `focus` and `in_progress`.
const UNKNOWN_PRIORITY: u8 = 6;

/// Which tasks to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Closed,
    All,
}

impl StatusFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            StatusFilter::Open => task.is_open(),
            StatusFilter::Closed => !task.is_open(),
            StatusFilter::All => true,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(StatusFilter::Open),
            "closed" => Ok(StatusFilter::Closed),
            "all" => Ok(StatusFilter::All),
            other => Err(OpsError::InvalidStatusFilter(other.to_string())),
        }
    }
}

/// A parsed task together with where it came from
#[derive(Debug, Clone)]
pub struct LocatedTask {
    pub id: String,
    pub path: PathBuf,
    pub line_number: usize,
    pub task: Task,
}

impl LocatedTask {
    /// `<title> [<status>]`
    pub fn label(&self) -> String {
        format!("{} [{}]", self.task.title, self.task.status_keyword())
    }

    /// `<note id>:<line>`
    pub fn location(&self) -> String {
        format!("{}:{}", self.id, self.line_number)
    }
}

/// A marker line that did not parse as a task
#[derive(Debug, Clone)]
pub struct SkippedLine {
    pub hit: SearchHit,
    pub error: ParseError,
}

/// Result of turning marker search hits into tasks
#[derive(Debug, Default)]
pub struct TaskReport {
    /// Sorted by status priority
    pub tasks: Vec<LocatedTask>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse every hit, skip (and report) lines that fail, sort by priority.
pub fn collect_tasks(hits: Vec<SearchHit>) -> TaskReport {
    let mut report = TaskReport::default();

    for hit in hits {
        match parse_task(&hit.text) {
            Ok(task) => report.tasks.push(LocatedTask {
                id: hit.id,
                path: hit.path,
                line_number: hit.line_number,
                task,
            }),
            Err(error) => {
                tracing::warn!(
                    path = %hit.path.display(),
                    line = hit.line_number,
                    %error,
                    "skipping task line"
                );
                report.skipped.push(SkippedLine { hit, error });
            }
        }
    }

    sort_by_priority(&mut report.tasks);
    report
}

pub fn status_priority(keyword: &str) -> u8 {
    STATUS_PRIORITY
        .iter()
        .find(|(k, _)| *k == keyword)
        .map_or(UNKNOWN_PRIORITY, |(_, p)| *p)
}

/// Stable: tasks of equal priority keep their search order
pub fn sort_by_priority(tasks: &mut [LocatedTask]) {
    tasks.sort_by_key(|t| status_priority(t.task.status_keyword()));
}

pub fn filter_tasks(tasks: &[LocatedTask], filter: StatusFilter) -> Vec<&LocatedTask> {
    tasks.iter().filter(|t| filter.accepts(&t.task)).collect()
}

/// Map a picked label back to its task: exact label first, then the first
/// task whose title appears in the selection.
pub fn locate<'a>(tasks: &'a [LocatedTask], selection: &str) -> Option<&'a LocatedTask> {
    let selection = selection.trim();
    tasks.iter().find(|t| t.label() == selection).or_else(|| {
        tasks
            .iter()
            .find(|t| !t.task.title.is_empty() && selection.contains(&t.task.title))
    })
}
