use crate::output::{cell, collect, parse_attributes, print_list, print_resource, ListArgs, ShowArgs};
use crate::prelude::{println, *};
use colored::Colorize;
use sparkapi_core::resources::Room;

/// Room commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List rooms you belong to
    List {
        /// Include SIP addresses in the response
        #[arg(long)]
        show_sip_address: bool,

        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single room
    Get {
        /// Room id
        id: String,

        /// Include the SIP address in the response
        #[arg(long)]
        show_sip_address: bool,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Create a room
    Create {
        /// Room title
        title: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Update room attributes (e.g. title="New title")
    Update {
        /// Room id
        id: String,

        /// Attributes as KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Delete a room
    Delete {
        /// Room id
        id: String,
    },
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List {
            show_sip_address,
            list,
        } => {
            let rooms = collect(
                api.list_rooms(show_sip_address, list.max),
                "rooms",
                list.limit,
            )?;
            print_list(
                &rooms,
                list.json,
                &["ID", "Title", "Locked", "Last Activity"],
                |room: &Room| {
                    vec![
                        cell(room.id()),
                        cell(room.title()),
                        cell(room.is_locked()),
                        cell(room.last_activity()),
                    ]
                },
            )
        }
        Commands::Get {
            id,
            show_sip_address,
            show,
        } => {
            let room = api
                .get_room(&id, show_sip_address)
                .with_context(|| format!("Failed to fetch room {}", id))?;
            print_resource(&room, show.json)
        }
        Commands::Create { title, show } => {
            let room = api
                .create_room(&title)
                .context("Failed to create room")?;
            print_resource(&room, show.json)
        }
        Commands::Update {
            id,
            attributes,
            show,
        } => {
            let room = api
                .update_room(&id, parse_attributes(&attributes)?)
                .with_context(|| format!("Failed to update room {}", id))?;
            print_resource(&room, show.json)
        }
        Commands::Delete { id } => {
            api.delete_room(&id)
                .with_context(|| format!("Failed to delete room {}", id))?;
            println!("{} room {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}
