use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod memberships;
mod messages;
mod output;
mod people;
mod prelude;
mod rooms;
mod teams;
mod transport;
mod webhooks;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Command line client for the Spark REST API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Access token sent as a bearer token
    #[clap(long, env = "SPARK_ACCESS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// API base URL
    #[clap(long, env = "SPARK_API_URL", global = true, default_value = sparkapi_core::endpoints::DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds (no timeout when unset)
    #[clap(long, env = "SPARK_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "SPARK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Room operations
    #[clap(subcommand)]
    Rooms(crate::rooms::Commands),

    /// People operations
    #[clap(subcommand)]
    People(crate::people::Commands),

    /// Room membership operations
    #[clap(subcommand)]
    Memberships(crate::memberships::Commands),

    /// Message operations
    #[clap(subcommand)]
    Messages(crate::messages::Commands),

    /// Team operations
    #[clap(subcommand)]
    Teams(crate::teams::Commands),

    /// Team membership operations
    #[clap(subcommand)]
    TeamMemberships(crate::teams::MembershipCommands),

    /// Webhook operations
    #[clap(subcommand)]
    Webhooks(crate::webhooks::Commands),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Rooms(cmd) => crate::rooms::run(cmd, app.global),
        SubCommands::People(cmd) => crate::people::run(cmd, app.global),
        SubCommands::Memberships(cmd) => crate::memberships::run(cmd, app.global),
        SubCommands::Messages(cmd) => crate::messages::run(cmd, app.global),
        SubCommands::Teams(cmd) => crate::teams::run(cmd, app.global),
        SubCommands::TeamMemberships(cmd) => crate::teams::run_memberships(cmd, app.global),
        SubCommands::Webhooks(cmd) => crate::webhooks::run(cmd, app.global),
    }
}
