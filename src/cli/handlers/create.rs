use chrono::Local;

use super::{Context, HandlerResult, print_json};
use crate::cli::commands::{DailyArgs, NewArgs};
use crate::io::notebook_io::{self, NotebookError};
use crate::ops::notes;

pub fn cmd_new(ctx: &Context, args: NewArgs) -> HandlerResult {
    let content = notes::new_note_content(&args.query)?;
    let id = notes::new_note_id(Local::now().naive_local());
    let path = ctx.dir.join(format!("{}.md", id));
    notebook_io::create_note(&path, &content)?;

    if ctx.json {
        return print_json(&serde_json::json!({ "id": id, "path": path }));
    }
    println!("{}", id);
    Ok(())
}

/// Existing daily notes are left alone
pub fn cmd_daily(ctx: &Context, args: DailyArgs) -> HandlerResult {
    let mut created = Vec::new();
    for daily in notes::daily_notes(args.from, args.to)? {
        let path = ctx.dir.join(&daily.file_name);
        match notebook_io::create_note(&path, &daily.content) {
            Ok(()) => created.push(daily.file_name),
            Err(NotebookError::NoteExists(_)) => {
                tracing::debug!(path = %path.display(), "daily note exists");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if ctx.json {
        return print_json(&created);
    }
    for name in &created {
        println!("{}", name);
    }
    Ok(())
}
