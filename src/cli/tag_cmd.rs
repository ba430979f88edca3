//! Tag and timestamp command handlers

use crate::application::ports::MediaIndex;
use crate::application::LibraryStore;
use crate::domain::recording::Duration;

use super::args::{MarkAction, TagAction};
use super::error::CliError;
use super::library_cmd::{resolve_recording, select_all};
use super::presenter::Presenter;

/// Handle tag subcommand
pub fn handle_tag_command<M: MediaIndex>(
    action: TagAction,
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
) -> Result<(), CliError> {
    match action {
        TagAction::Add { tag, recordings } => {
            select_all(library, &recordings)?;
            let tagged = library.add_tag_to_selection(&tag);
            library.clear_selection();
            if tagged == 0 {
                presenter.warn("Nothing changed");
            } else {
                presenter.success(&format!("Tagged {} recording(s) with #{}", tagged, tag.trim()));
            }
        }
        TagAction::Rm { tag, recording } => {
            let id = resolve_recording(library, &recording)?;
            if library.delete_tag(&id, &tag) {
                presenter.success(&format!("Removed #{} from {}", tag, recording));
            } else {
                presenter.warn(&format!("{} is not tagged #{}", recording, tag));
            }
        }
        TagAction::List => {
            if library.tags().is_empty() {
                presenter.info("No tags");
                return Ok(());
            }
            let lines: Vec<String> = library
                .tags()
                .iter()
                .map(|tag| {
                    let uses = library
                        .recordings()
                        .iter()
                        .filter(|r| library.data(&r.id).is_some_and(|d| d.has_tag(&tag.name)))
                        .count();
                    format!("#{}  {}", tag, uses)
                })
                .collect();
            presenter.output_lines(lines);
        }
    }
    Ok(())
}

/// Handle mark (timestamp) subcommand
pub fn handle_mark_command<M: MediaIndex>(
    action: MarkAction,
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
) -> Result<(), CliError> {
    match action {
        MarkAction::Add {
            recording,
            time,
            title,
            description,
        } => {
            let time: Duration = time.parse()?;
            let id = resolve_recording(library, &recording)?;
            if library.add_timestamp(&id, time, &title, description) {
                presenter.success(&format!("Marked {} at {}", recording, time));
            } else {
                presenter.warn(&format!("{} already has a timestamp at {}", recording, time));
            }
        }
        MarkAction::Rm { recording, time } => {
            let time: Duration = time.parse()?;
            let id = resolve_recording(library, &recording)?;
            if library.delete_timestamp(&id, time) {
                presenter.success(&format!("Removed timestamp at {}", time));
            } else {
                presenter.warn(&format!("{} has no timestamp at {}", recording, time));
            }
        }
        MarkAction::List { recording } => {
            let id = resolve_recording(library, &recording)?;
            let timestamps = library.timestamps(&id);
            if timestamps.is_empty() {
                presenter.info("No timestamps");
                return Ok(());
            }
            presenter.output_lines(timestamps.iter().map(|t| presenter.format_timestamp(t)));
        }
    }
    Ok(())
}
