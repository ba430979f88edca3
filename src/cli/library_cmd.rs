//! Library command handlers: listing, search, verification, edit and delete

use crate::application::ports::{ConsentRequest, MediaIndex};
use crate::application::LibraryStore;
use crate::domain::library::GroupId;
use crate::domain::recording::RecordingId;
use crate::domain::search::SearchQuery;

use super::args::{Commands, SearchArgs};
use super::error::CliError;
use super::presenter::Presenter;
use super::{group_cmd, tag_cmd};

/// Run one library command against an opened, reloaded library
pub async fn handle_library_command<M: MediaIndex>(
    command: Commands,
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
) -> Result<(), CliError> {
    match command {
        Commands::List { by_day } => handle_list(library, presenter, by_day),
        Commands::Show { recording } => handle_show(library, presenter, &recording),
        Commands::Verify => handle_verify(library, presenter),
        Commands::Search(args) => handle_search(library, presenter, args),
        Commands::Edit {
            recording,
            title,
            description,
        } => handle_edit(library, presenter, &recording, title, description).await,
        Commands::Delete { recordings } => handle_delete(library, presenter, &recordings).await,
        Commands::Tag { action } => tag_cmd::handle_tag_command(action, library, presenter),
        Commands::Mark { action } => tag_cmd::handle_mark_command(action, library, presenter),
        Commands::Group { action } => group_cmd::handle_group_command(action, library, presenter),
        // Handled before the library is opened
        Commands::Config { .. } => Ok(()),
    }
}

/// Find a recording by exact name, then by URI
pub(super) fn resolve_recording<M: MediaIndex>(
    library: &LibraryStore<M>,
    reference: &str,
) -> Result<RecordingId, CliError> {
    library
        .recording_named(reference)
        .or_else(|| library.recording(&RecordingId::new(reference)))
        .map(|r| r.id.clone())
        .ok_or_else(|| CliError::UnknownRecording(reference.to_string()))
}

/// Find a group by exact name, then by UUID
pub(super) fn resolve_group<M: MediaIndex>(
    library: &LibraryStore<M>,
    reference: &str,
) -> Result<GroupId, CliError> {
    library
        .group_named(reference)
        .map(|g| g.uuid)
        .or_else(|| {
            reference
                .parse::<GroupId>()
                .ok()
                .filter(|id| library.group(*id).is_some())
        })
        .ok_or_else(|| CliError::UnknownGroup(reference.to_string()))
}

/// Replace the selection with the referenced recordings
pub(super) fn select_all<M: MediaIndex>(
    library: &mut LibraryStore<M>,
    references: &[String],
) -> Result<(), CliError> {
    let ids = references
        .iter()
        .map(|r| resolve_recording(library, r))
        .collect::<Result<Vec<_>, _>>()?;

    library.clear_selection();
    for id in &ids {
        library.select(id);
    }
    Ok(())
}

pub(super) fn report_consent(presenter: &Presenter, request: &ConsentRequest) {
    let targets: Vec<&str> = request.recordings.iter().map(|id| id.as_str()).collect();
    presenter.warn(&format!(
        "Permission needed to {} {}. The library already reflects the change; retry once access is granted.",
        request.action,
        targets.join(", ")
    ));
}

fn handle_list<M: MediaIndex>(
    library: &LibraryStore<M>,
    presenter: &Presenter,
    by_day: bool,
) -> Result<(), CliError> {
    if library.recordings().is_empty() {
        presenter.info("No recordings");
        return Ok(());
    }

    if by_day {
        for (day, recordings) in library.recordings_by_day() {
            presenter.section(&day.to_string());
            presenter.output_lines(
                recordings
                    .iter()
                    .map(|r| presenter.format_recording(r, library.data(&r.id))),
            );
        }
    } else {
        presenter.output_lines(
            library
                .recordings()
                .iter()
                .map(|r| presenter.format_recording(r, library.data(&r.id))),
        );
    }
    Ok(())
}

fn handle_show<M: MediaIndex>(
    library: &LibraryStore<M>,
    presenter: &Presenter,
    reference: &str,
) -> Result<(), CliError> {
    let id = resolve_recording(library, reference)?;
    let Some(recording) = library.recording(&id) else {
        return Err(CliError::UnknownRecording(reference.to_string()));
    };
    let data = library.data(&id);

    presenter.output(&presenter.format_recording(recording, data));
    presenter.key_value("uri", id.as_str());
    presenter.key_value("path", &recording.path.to_string_lossy());

    if let Some(data) = data {
        if !data.description.is_empty() {
            presenter.key_value("description", &data.description);
        }
        if let Some(group) = data.group_uuid.and_then(|g| library.group(g)) {
            presenter.key_value(
                "group",
                &format!("{} (#{})", group.name, data.group_order_number + 1),
            );
        }
    }

    let timestamps = library.timestamps(&id);
    if !timestamps.is_empty() {
        presenter.section("Timestamps");
        presenter.output_lines(timestamps.iter().map(|t| presenter.format_timestamp(t)));
    }
    Ok(())
}

fn handle_verify<M: MediaIndex>(
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
) -> Result<(), CliError> {
    let report = library.verify();
    if report.is_clean() {
        presenter.success("Library is consistent");
        return Ok(());
    }

    if !report.orphaned.is_empty() {
        presenter.info(&format!(
            "Removed annotations of {} vanished recording(s)",
            report.orphaned.len()
        ));
    }
    if !report.detached.is_empty() {
        presenter.info(&format!(
            "Detached {} recording(s) from deleted groups",
            report.detached.len()
        ));
    }
    for tag in &report.pruned_tags {
        presenter.info(&format!("Removed unused tag #{}", tag));
    }
    for tag in &report.restored_tags {
        presenter.info(&format!("Registered missing tag #{}", tag));
    }
    presenter.success("Library verified");
    Ok(())
}

fn handle_search<M: MediaIndex>(
    library: &LibraryStore<M>,
    presenter: &Presenter,
    args: SearchArgs,
) -> Result<(), CliError> {
    let mut query = SearchQuery::new(args.query);
    if let Some(tag) = args.tag {
        query = query.with_tag(tag);
    }

    let hits = library.search(&query);
    if hits.is_empty() {
        presenter.info("No matches");
        return Ok(());
    }
    presenter.output_lines(hits.iter().map(|h| presenter.format_hit(h)));
    Ok(())
}

async fn handle_edit<M: MediaIndex>(
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
    reference: &str,
    title: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let id = resolve_recording(library, reference)?;
    // Without --description the current one is kept
    let description = description
        .or_else(|| library.data(&id).map(|d| d.description.clone()))
        .unwrap_or_default();
    let title = title.unwrap_or_default();

    if let Some(request) = library.edit_recording(&id, &title, &description).await? {
        report_consent(presenter, &request);
    }
    presenter.success("Recording updated");
    Ok(())
}

async fn handle_delete<M: MediaIndex>(
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
    references: &[String],
) -> Result<(), CliError> {
    select_all(library, references)?;
    let outcome = library.delete_selection().await;

    if let Some(request) = &outcome.consent {
        report_consent(presenter, request);
    }
    for (id, error) in &outcome.failed {
        presenter.error(&format!("{}: {}", id, error));
    }
    for tag in &outcome.pruned_tags {
        presenter.info(&format!("Removed unused tag #{}", tag));
    }
    if !outcome.removed.is_empty() {
        presenter.success(&format!("Deleted {} recording(s)", outcome.removed.len()));
    }

    if outcome.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::DeleteFailed(outcome.failed.len()))
    }
}
