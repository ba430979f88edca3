//! Group command handler

use crate::application::ports::MediaIndex;
use crate::application::LibraryStore;

use super::args::GroupAction;
use super::error::CliError;
use super::library_cmd::{resolve_group, resolve_recording};
use super::presenter::Presenter;

/// Handle group subcommand
pub fn handle_group_command<M: MediaIndex>(
    action: GroupAction,
    library: &mut LibraryStore<M>,
    presenter: &Presenter,
) -> Result<(), CliError> {
    match action {
        GroupAction::Create { name, image, color } => {
            let id = library.create_group(&name, image, color);
            presenter.success(&format!("Created group {}", name.trim()));
            presenter.output(&id.to_string());
        }
        GroupAction::Edit { group, name, image } => {
            let id = resolve_group(library, &group)?;
            let image = image.or_else(|| library.group(id).and_then(|g| g.image_uri.clone()));
            library.edit_group(id, name.as_deref().unwrap_or(""), image);
            presenter.success("Group updated");
        }
        GroupAction::Delete { group } => {
            let id = resolve_group(library, &group)?;
            let members = library.group_members(id).len();
            library.delete_group(id);
            presenter.success(&format!(
                "Deleted group {}; {} recording(s) ungrouped",
                group, members
            ));
        }
        GroupAction::Add { group, recordings } => {
            let id = resolve_group(library, &group)?;
            // Members are appended in the order given on the command line
            let targets = recordings
                .iter()
                .map(|r| resolve_recording(library, r))
                .collect::<Result<Vec<_>, _>>()?;
            let added = targets
                .iter()
                .filter(|recording| library.add_to_group(id, recording))
                .count();
            if added == 0 {
                presenter.warn("Nothing changed");
            } else {
                presenter.success(&format!("Added {} recording(s) to {}", added, group));
            }
        }
        GroupAction::Remove { recording } => {
            let id = resolve_recording(library, &recording)?;
            if library.remove_from_group(&id) {
                presenter.success(&format!("{} removed from its group", recording));
            } else {
                presenter.warn(&format!("{} is not in a group", recording));
            }
        }
        GroupAction::Order { group } => {
            let id = resolve_group(library, &group)?;
            if library.order_group(id) {
                presenter.success("Group renumbered");
            } else {
                presenter.info("Group order already dense");
            }
        }
        GroupAction::Show { group } => {
            let id = resolve_group(library, &group)?;
            let members = library.group_members(id);
            if members.is_empty() {
                presenter.info("Group is empty");
                return Ok(());
            }
            presenter.output_lines(members.iter().enumerate().map(|(position, r)| {
                format!(
                    "{:>3}. {}",
                    position + 1,
                    presenter.format_recording(r, library.data(&r.id))
                )
            }));
        }
        GroupAction::List => {
            if library.groups().is_empty() {
                presenter.info("No groups");
                return Ok(());
            }
            presenter.output_lines(
                library
                    .groups()
                    .iter()
                    .map(|g| presenter.format_group(g, library.group_members(g.uuid).len())),
            );
        }
    }
    Ok(())
}
