mod create;
pub use create::{cmd_daily, cmd_new};

use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::notebook_io;
use crate::model::config::Config;
use crate::model::note::Note;
use crate::ops::tasks::{self, LocatedTask, StatusFilter};
use crate::ops::{OpsError, notes, obsidian};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Resolved settings shared by every command
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl Context {
    fn read_notes(&self) -> Result<Vec<Note>, notebook_io::NotebookError> {
        notebook_io::read_notes(&self.dir)
    }

    /// All tasks under the marker, sorted by priority
    fn collect_tasks(&self) -> Result<Vec<LocatedTask>, notebook_io::NotebookError> {
        let hits = notebook_io::search_marker(&self.dir, &self.config.tasks.marker)?;
        Ok(tasks::collect_tasks(hits).tasks)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> HandlerResult {
    let config = config_io::load_config()?;
    let dir = cli
        .dir
        .clone()
        .unwrap_or_else(|| config_io::expand_home(&config.notebook.dir));
    tracing::debug!(dir = %dir.display(), "notebook");

    let ctx = Context {
        dir,
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Titles => cmd_titles(&ctx),
        Commands::Find(args) => cmd_find(&ctx, args),
        Commands::Link(args) => cmd_link(&ctx, args),
        Commands::Url(args) => cmd_url(&ctx, args),
        Commands::New(args) => cmd_new(&ctx, args),
        Commands::Tasks(args) => cmd_tasks(&ctx, args),
        Commands::Locate(args) => cmd_locate(&ctx, args),
        Commands::Daily(args) => cmd_daily(&ctx, args),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> HandlerResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

fn cmd_titles(ctx: &Context) -> HandlerResult {
    let notes = ctx.read_notes()?;
    if ctx.json {
        let out: Vec<NoteJson> = notes.iter().map(NoteJson::from).collect();
        return print_json(&out);
    }
    for note in &notes {
        println!("{}", note.display_title());
    }
    Ok(())
}

/// Prints nothing when no note matches
fn cmd_find(ctx: &Context, args: FindArgs) -> HandlerResult {
    let notes = ctx.read_notes()?;
    let Some(note) = notes::find_by_title(&notes, args.title.trim()) else {
        return Ok(());
    };
    if ctx.json {
        return print_json(&NoteJson::from(note));
    }
    println!("{}", note.path.display());
    Ok(())
}

fn cmd_link(ctx: &Context, args: LinkArgs) -> HandlerResult {
    let notes = ctx.read_notes()?;
    let note = notes::require_by_title(&notes, args.title.trim())?;
    println!("{}", notes::wikilink(note, &ctx.dir));
    Ok(())
}

fn cmd_url(ctx: &Context, args: UrlArgs) -> HandlerResult {
    let vault = &ctx.config.obsidian.vault;
    let title = args.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let query = args.query.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let url = match (title, query) {
        (Some(title), _) => {
            let notes = ctx.read_notes()?;
            let note = notes::require_by_title(&notes, title)?;
            obsidian::open_note_url(vault, &notes::link_target(note, &ctx.dir))
        }
        (None, Some(query)) => {
            let id = notes::new_note_id(chrono::Local::now().naive_local());
            obsidian::new_note_url(vault, &id, &notes::new_note_content(query)?)
        }
        (None, None) => return Ok(()),
    };
    println!("{}", url);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_tasks(ctx: &Context, args: TasksArgs) -> HandlerResult {
    let filter: StatusFilter = args
        .status
        .as_deref()
        .unwrap_or(ctx.config.tasks.status.as_str())
        .parse()?;
    let all = ctx.collect_tasks()?;
    let shown = tasks::filter_tasks(&all, filter);

    if ctx.json {
        let out: Vec<TaskJson> = shown.into_iter().map(TaskJson::from).collect();
        return print_json(&out);
    }
    for located in shown {
        if args.long {
            println!("{}", format_task_row(located));
        } else {
            println!("{}", located.label());
        }
    }
    Ok(())
}

fn cmd_locate(ctx: &Context, args: LocateArgs) -> HandlerResult {
    let all = ctx.collect_tasks()?;
    let located = tasks::locate(&all, &args.label)
        .ok_or_else(|| OpsError::TaskNotFound(args.label.clone()))?;

    if ctx.json {
        return print_json(&LocationJson {
            note: &located.id,
            path: &located.path,
            line: located.line_number,
        });
    }
    println!("{}", located.location());
    Ok(())
}
