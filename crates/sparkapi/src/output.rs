//! Shared rendering helpers for resource commands

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value as Json;
use sparkapi_core::api::{Attributes, PersonRef};
use sparkapi_core::resources::Resource;

use crate::prelude::{println, *};

/// Options shared by every `list` command
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Stop after this many items (no further pages are fetched)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Page size requested from the API
    #[arg(long)]
    pub max: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options shared by commands printing a single resource
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Person selection for membership commands
#[derive(Debug, Clone, clap::Args)]
pub struct PersonArgs {
    /// Person id
    #[arg(long, conflicts_with = "person_email")]
    pub person_id: Option<String>,

    /// Person email address
    #[arg(long)]
    pub person_email: Option<String>,
}

impl PersonArgs {
    pub fn person(&self) -> Option<PersonRef> {
        match (&self.person_id, &self.person_email) {
            (Some(id), _) => Some(PersonRef::Id(id.clone())),
            (None, Some(email)) => Some(PersonRef::Email(email.clone())),
            (None, None) => None,
        }
    }

    /// Like [`PersonArgs::person`], failing when neither flag was given
    pub fn require(&self) -> Result<PersonRef> {
        self.person()
            .ok_or_eyre("either --person-id or --person-email is required")
    }
}

/// Render a fallible attribute read, using "-" for missing values
pub fn cell<T: ToString>(value: sparkapi_core::Result<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "-".to_string())
}

/// Drain a lazy listing behind a spinner, honoring `--limit`
pub fn collect<R, I>(items: I, label: &str, limit: Option<usize>) -> Result<Vec<R>>
where
    I: Iterator<Item = sparkapi_core::Result<R>>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(format!("Fetching {}...", label));

    let result = items
        .take(limit.unwrap_or(usize::MAX))
        .collect::<sparkapi_core::Result<Vec<R>>>()
        .with_context(|| format!("Failed to list {}", label));

    spinner.finish_and_clear();
    result
}

/// Print a list of resources as a table, or as a JSON array
pub fn print_list<R, F>(items: &[R], json: bool, headers: &[&str], row: F) -> Result<()>
where
    R: Resource,
    F: Fn(&R) -> Vec<String>,
{
    if json {
        let values = items
            .iter()
            .map(Resource::to_json)
            .collect::<sparkapi_core::Result<Vec<Json>>>()?;
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No {} found.", pluralize(R::NAME));
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::Row::new(
        headers
            .iter()
            .map(|h| prettytable::Cell::new(&h.bold().cyan().to_string()))
            .collect(),
    ));
    for item in items {
        table.add_row(prettytable::Row::new(
            row(item)
                .iter()
                .map(|value| prettytable::Cell::new(value))
                .collect(),
        ));
    }
    table.printstd();

    println!("\n{} {}", items.len().to_string().bold(), pluralize(R::NAME));
    Ok(())
}

/// Print every payload attribute of a single resource
pub fn print_resource<R: Resource>(resource: &R, json: bool) -> Result<()> {
    if json {
        println!("{}", resource.model().to_json_string(true)?);
        return Ok(());
    }

    let mut table = new_table();
    for key in resource.model().json_keys() {
        let value = match resource.get(key)?.to_json()? {
            Json::String(text) => text,
            other => other.to_string(),
        };
        table.add_row(prettytable::row![key.bright_yellow(), value]);
    }
    table.printstd();
    Ok(())
}

/// Parse `KEY=VALUE` pairs into update attributes
///
/// Values that parse as JSON (numbers, booleans, arrays...) are sent as such,
/// anything else is sent as a string.
pub fn parse_attributes(pairs: &[String]) -> Result<Attributes, Error> {
    let mut attributes = Attributes::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| Error::InvalidAttribute(pair.clone()))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Json::String(value.to_string()));
        attributes.insert(key.trim().to_string(), value);
    }
    Ok(attributes)
}

fn pluralize(name: &str) -> String {
    match name {
        "person" => "people".to_string(),
        name => format!("{}s", name),
    }
}
