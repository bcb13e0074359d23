//! Pickup location commands

use std::io;

use clap::Subcommand;
use saffron::{cart::CartStore, menu::LocationId, storage::StateStorage};
use saffron_client::{MenuApi, MenuCatalog};

use crate::{errors::CliError, output::write_table};

/// Location subcommands.
#[derive(Debug, Subcommand)]
pub enum LocationCommand {
    /// List pickup locations
    List,

    /// Pick up from this location
    Set {
        /// Location id
        id: String,
    },

    /// Forget the chosen location
    Clear,
}

pub(crate) async fn run<S: StateStorage, A: MenuApi>(
    command: LocationCommand,
    store: &mut CartStore<S>,
    catalog: &MenuCatalog<A>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        LocationCommand::List => {
            let locations = catalog.locations().await?;
            let selected = store.cart().selected_location_id();

            write_table(
                out,
                &["", "ID", "Name", "Address", "Phone"],
                locations
                    .iter()
                    .filter(|location| location.is_active)
                    .map(|location| {
                        let marker = if selected == Some(&location.id) { "*" } else { "" };

                        vec![
                            marker.to_string(),
                            location.id.to_string(),
                            location.name.clone(),
                            location.address.clone(),
                            location.phone.clone().unwrap_or_default(),
                        ]
                    }),
            )?;
        }
        LocationCommand::Set { id } => {
            let id = LocationId::new(id);
            let locations = catalog.locations().await?;

            let Some(location) = locations
                .iter()
                .find(|location| location.id == id && location.is_active)
            else {
                return Err(CliError::UnknownLocation(id.into_string()));
            };

            store.set_selected_location_id(Some(location.id.clone()));

            writeln!(out, "Picking up from {}", location.name)?;
        }
        LocationCommand::Clear => {
            store.set_selected_location_id(None);

            writeln!(out, "No pickup location selected")?;
        }
    }

    Ok(())
}
