use crate::output::{cell, collect, print_list, print_resource, ListArgs, ShowArgs};
use crate::prelude::*;
use sparkapi_core::api::PersonFilter;
use sparkapi_core::resources::Person;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search people by email or display name
    List {
        /// Email address to look up
        #[arg(long, conflicts_with = "display_name", required_unless_present = "display_name")]
        email: Option<String>,

        /// Display name prefix to look up
        #[arg(long)]
        display_name: Option<String>,

        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single person
    Get {
        /// Person id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Show the person owning the access token
    Me {
        #[clap(flatten)]
        show: ShowArgs,
    },
}

fn filter(email: Option<String>, display_name: Option<String>) -> Result<PersonFilter> {
    match (email, display_name) {
        (Some(email), _) => Ok(PersonFilter::Email(email)),
        (None, Some(name)) => Ok(PersonFilter::DisplayName(name)),
        (None, None) => Err(eyre!("either --email or --display-name is required")),
    }
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List {
            email,
            display_name,
            list,
        } => {
            let filter = filter(email, display_name)?;
            let people = collect(api.list_people(&filter, list.max), "people", list.limit)?;
            print_list(
                &people,
                list.json,
                &["ID", "Display Name", "Emails", "Created"],
                |person: &Person| {
                    vec![
                        cell(person.id()),
                        cell(person.display_name()),
                        cell(person.emails().map(|emails| emails.join(", "))),
                        cell(person.created()),
                    ]
                },
            )
        }
        Commands::Get { id, show } => {
            let person = api
                .get_person(&id)
                .with_context(|| format!("Failed to fetch person {}", id))?;
            print_resource(&person, show.json)
        }
        Commands::Me { show } => {
            let person = api
                .get_person_me()
                .context("Failed to fetch the current user")?;
            print_resource(&person, show.json)
        }
    }
}
