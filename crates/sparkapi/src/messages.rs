use crate::output::{cell, collect, print_list, print_resource, ListArgs, ShowArgs};
use crate::prelude::{println, *};
use colored::Colorize;
use sparkapi_core::api::{CreateMessageParams, ListMessagesParams, MessageTarget};
use sparkapi_core::resources::Message;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the messages of a room, newest first
    List {
        /// Room id
        room_id: String,

        /// Only messages sent before this time (e.g. 2016-04-21T19:01:55.966Z)
        #[arg(long)]
        before: Option<String>,

        /// Only messages sent before this message id
        #[arg(long)]
        before_message: Option<String>,

        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single message
    Get {
        /// Message id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Post a message to a room or directly to a person
    Create {
        /// Room to post to
        #[arg(long, group = "target")]
        room_id: Option<String>,

        /// Person id to message directly
        #[arg(long, group = "target")]
        to_person_id: Option<String>,

        /// Person email to message directly
        #[arg(long, group = "target")]
        to_person_email: Option<String>,

        /// Message text
        #[arg(short, long)]
        text: Option<String>,

        /// Public URL of a file to attach (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Delete a message
    Delete {
        /// Message id
        id: String,
    },
}

fn target(
    room_id: Option<String>,
    to_person_id: Option<String>,
    to_person_email: Option<String>,
) -> Result<MessageTarget> {
    room_id
        .map(MessageTarget::Room)
        .or(to_person_id.map(MessageTarget::PersonId))
        .or(to_person_email.map(MessageTarget::PersonEmail))
        .ok_or_eyre("one of --room-id, --to-person-id or --to-person-email is required")
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List {
            room_id,
            before,
            before_message,
            list,
        } => {
            let params = ListMessagesParams {
                room_id,
                before,
                before_message,
                max: list.max,
            };
            let messages = collect(api.list_messages(&params), "messages", list.limit)?;
            print_list(
                &messages,
                list.json,
                &["ID", "From", "Text", "Created"],
                |message: &Message| {
                    vec![
                        cell(message.id()),
                        cell(message.person_email()),
                        cell(message.text()),
                        cell(message.created()),
                    ]
                },
            )
        }
        Commands::Get { id, show } => {
            let message = api
                .get_message(&id)
                .with_context(|| format!("Failed to fetch message {}", id))?;
            print_resource(&message, show.json)
        }
        Commands::Create {
            room_id,
            to_person_id,
            to_person_email,
            text,
            files,
            show,
        } => {
            let params = CreateMessageParams {
                target: target(room_id, to_person_id, to_person_email)?,
                text,
                files,
            };
            let message = api
                .create_message(params)
                .context("Failed to post message")?;
            print_resource(&message, show.json)
        }
        Commands::Delete { id } => {
            api.delete_message(&id)
                .with_context(|| format!("Failed to delete message {}", id))?;
            println!("{} message {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}
