use crate::output::{
    cell, collect, parse_attributes, print_list, print_resource, ListArgs, PersonArgs, ShowArgs,
};
use crate::prelude::{println, *};
use colored::Colorize;
use sparkapi_core::api::{CreateMembershipParams, ListMembershipsParams};
use sparkapi_core::resources::Membership;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the members of a room
    List {
        /// Room id
        room_id: String,

        #[clap(flatten)]
        person: PersonArgs,

        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single membership
    Get {
        /// Membership id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Add a person to a room
    Create {
        /// Room id
        room_id: String,

        #[clap(flatten)]
        person: PersonArgs,

        /// Make the person a room moderator
        #[arg(long)]
        moderator: bool,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Update membership attributes (e.g. isModerator=true)
    Update {
        /// Membership id
        id: String,

        /// Attributes as KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Remove a person from a room
    Delete {
        /// Membership id
        id: String,
    },
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List {
            room_id,
            person,
            list,
        } => {
            let params = ListMembershipsParams {
                room_id,
                person: person.person(),
                max: list.max,
            };
            let memberships = collect(api.list_memberships(&params), "memberships", list.limit)?;
            print_list(
                &memberships,
                list.json,
                &["ID", "Person", "Email", "Moderator", "Created"],
                |membership: &Membership| {
                    vec![
                        cell(membership.id()),
                        cell(membership.person_display_name()),
                        cell(membership.person_email()),
                        cell(membership.is_moderator()),
                        cell(membership.created()),
                    ]
                },
            )
        }
        Commands::Get { id, show } => {
            let membership = api
                .get_membership(&id)
                .with_context(|| format!("Failed to fetch membership {}", id))?;
            print_resource(&membership, show.json)
        }
        Commands::Create {
            room_id,
            person,
            moderator,
            show,
        } => {
            let params = CreateMembershipParams {
                room_id,
                person: person.require()?,
                is_moderator: moderator,
            };
            let membership = api
                .create_membership(&params)
                .context("Failed to create membership")?;
            print_resource(&membership, show.json)
        }
        Commands::Update {
            id,
            attributes,
            show,
        } => {
            let membership = api
                .update_membership(&id, parse_attributes(&attributes)?)
                .with_context(|| format!("Failed to update membership {}", id))?;
            print_resource(&membership, show.json)
        }
        Commands::Delete { id } => {
            api.delete_membership(&id)
                .with_context(|| format!("Failed to delete membership {}", id))?;
            println!("{} membership {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}
