use crate::output::{
    cell, collect, parse_attributes, print_list, print_resource, ListArgs, PersonArgs, ShowArgs,
};
use crate::prelude::{println, *};
use colored::Colorize;
use sparkapi_core::api::CreateTeamMembershipParams;
use sparkapi_core::resources::{Team, TeamMembership};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List teams you belong to
    List {
        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single team
    Get {
        /// Team id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Create a team
    Create {
        /// Team name
        name: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Update team attributes (e.g. name="New name")
    Update {
        /// Team id
        id: String,

        /// Attributes as KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Delete a team
    Delete {
        /// Team id
        id: String,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum MembershipCommands {
    /// List the members of a team
    List {
        /// Team id
        team_id: String,

        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single team membership
    Get {
        /// Team membership id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Add a person to a team
    Create {
        /// Team id
        team_id: String,

        #[clap(flatten)]
        person: PersonArgs,

        /// Make the person a team moderator
        #[arg(long)]
        moderator: bool,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Update team membership attributes (e.g. isModerator=true)
    Update {
        /// Team membership id
        id: String,

        /// Attributes as KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Remove a person from a team
    Delete {
        /// Team membership id
        id: String,
    },
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List { list } => {
            let teams = collect(api.list_teams(list.max), "teams", list.limit)?;
            print_list(
                &teams,
                list.json,
                &["ID", "Name", "Created"],
                |team: &Team| vec![cell(team.id()), cell(team.name()), cell(team.created())],
            )
        }
        Commands::Get { id, show } => {
            let team = api
                .get_team(&id)
                .with_context(|| format!("Failed to fetch team {}", id))?;
            print_resource(&team, show.json)
        }
        Commands::Create { name, show } => {
            let team = api.create_team(&name).context("Failed to create team")?;
            print_resource(&team, show.json)
        }
        Commands::Update {
            id,
            attributes,
            show,
        } => {
            let team = api
                .update_team(&id, parse_attributes(&attributes)?)
                .with_context(|| format!("Failed to update team {}", id))?;
            print_resource(&team, show.json)
        }
        Commands::Delete { id } => {
            api.delete_team(&id)
                .with_context(|| format!("Failed to delete team {}", id))?;
            println!("{} team {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}

pub fn run_memberships(cmd: MembershipCommands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        MembershipCommands::List { team_id, list } => {
            let members = collect(
                api.list_team_memberships(&team_id, list.max),
                "team memberships",
                list.limit,
            )?;
            print_list(
                &members,
                list.json,
                &["ID", "Person", "Email", "Moderator", "Created"],
                |member: &TeamMembership| {
                    vec![
                        cell(member.id()),
                        cell(member.person_display_name()),
                        cell(member.person_email()),
                        cell(member.is_moderator()),
                        cell(member.created()),
                    ]
                },
            )
        }
        MembershipCommands::Get { id, show } => {
            let member = api
                .get_team_membership(&id)
                .with_context(|| format!("Failed to fetch team membership {}", id))?;
            print_resource(&member, show.json)
        }
        MembershipCommands::Create {
            team_id,
            person,
            moderator,
            show,
        } => {
            let params = CreateTeamMembershipParams {
                team_id,
                person: person.require()?,
                is_moderator: moderator,
            };
            let member = api
                .create_team_membership(&params)
                .context("Failed to create team membership")?;
            print_resource(&member, show.json)
        }
        MembershipCommands::Update {
            id,
            attributes,
            show,
        } => {
            let member = api
                .update_team_membership(&id, parse_attributes(&attributes)?)
                .with_context(|| format!("Failed to update team membership {}", id))?;
            print_resource(&member, show.json)
        }
        MembershipCommands::Delete { id } => {
            api.delete_team_membership(&id)
                .with_context(|| format!("Failed to delete team membership {}", id))?;
            println!("{} team membership {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}
