use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zt", about = concat!("zettel v", env!("CARGO_PKG_VERSION"), " - plaintext personal information management"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Notebook folder (default: notebook.dir from the config file)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List note titles, most recently modified first
    Titles,
    /// Print the path of the note with this title
    Find(FindArgs),
    /// Print a wikilink for a note
    Link(LinkArgs),
    /// Print an Obsidian link that opens a note, or creates one from a query
    Url(UrlArgs),
    /// Create a new note from a query
    New(NewArgs),
    /// Find all action items (todos) in the notebook
    Tasks(TasksArgs),
    /// Print `<note>:<line>` for a task label
    Locate(LocateArgs),
    /// Create daily notes for a date range
    Daily(DailyArgs),
}

#[derive(Args)]
pub struct FindArgs {
    /// Note title, plain or with its tag list
    pub title: String,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Note title, plain or with its tag list
    pub title: String,
}

#[derive(Args)]
pub struct UrlArgs {
    /// Title of an existing note to open
    #[arg(required_unless_present = "query")]
    pub title: Option<String>,
    /// Text for the heading of a new note
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Text for the heading of the new note
    pub query: String,
}

#[derive(Args)]
pub struct TasksArgs {
    /// One of: open, closed, all (default: tasks.status from the config file)
    #[arg(long)]
    pub status: Option<String>,
    /// Show location and tracked time next to each task
    #[arg(long, short)]
    pub long: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    /// A label as printed by `zt tasks`
    pub label: String,
}

#[derive(Args)]
pub struct DailyArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}
