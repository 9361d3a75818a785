use crate::output::{cell, collect, parse_attributes, print_list, print_resource, ListArgs, ShowArgs};
use crate::prelude::{println, *};
use colored::Colorize;
use sparkapi_core::api::CreateWebhookParams;
use sparkapi_core::resources::Webhook;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List registered webhooks
    List {
        #[clap(flatten)]
        list: ListArgs,
    },

    /// Show a single webhook
    Get {
        /// Webhook id
        id: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Register a webhook
    Create {
        /// Webhook name
        name: String,

        /// URL receiving the notifications
        target_url: String,

        /// Resource to watch
        #[arg(long, default_value = "messages")]
        resource: String,

        /// Event to watch
        #[arg(long, default_value = "created")]
        event: String,

        /// Filter expression (e.g. roomId=...)
        #[arg(long)]
        filter: String,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Update webhook attributes (e.g. targetUrl=https://example.com/hook)
    Update {
        /// Webhook id
        id: String,

        /// Attributes as KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        #[clap(flatten)]
        show: ShowArgs,
    },

    /// Delete a webhook
    Delete {
        /// Webhook id
        id: String,
    },
}

pub fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let api = crate::transport::connect(&global)?;

    match cmd {
        Commands::List { list } => {
            let webhooks = collect(api.list_webhooks(list.max), "webhooks", list.limit)?;
            print_list(
                &webhooks,
                list.json,
                &["ID", "Name", "Resource", "Event", "Filter"],
                |webhook: &Webhook| {
                    vec![
                        cell(webhook.id()),
                        cell(webhook.name()),
                        cell(webhook.resource()),
                        cell(webhook.event()),
                        cell(webhook.filter()),
                    ]
                },
            )
        }
        Commands::Get { id, show } => {
            let webhook = api
                .get_webhook(&id)
                .with_context(|| format!("Failed to fetch webhook {}", id))?;
            print_resource(&webhook, show.json)
        }
        Commands::Create {
            name,
            target_url,
            resource,
            event,
            filter,
            show,
        } => {
            let params = CreateWebhookParams {
                name,
                target_url,
                resource,
                event,
                filter,
            };
            let webhook = api
                .create_webhook(&params)
                .context("Failed to create webhook")?;
            print_resource(&webhook, show.json)
        }
        Commands::Update {
            id,
            attributes,
            show,
        } => {
            let webhook = api
                .update_webhook(&id, parse_attributes(&attributes)?)
                .with_context(|| format!("Failed to update webhook {}", id))?;
            print_resource(&webhook, show.json)
        }
        Commands::Delete { id } => {
            api.delete_webhook(&id)
                .with_context(|| format!("Failed to delete webhook {}", id))?;
            println!("{} webhook {}", "Deleted".bright_red(), id);
            Ok(())
        }
    }
}
