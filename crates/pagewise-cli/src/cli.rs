use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pagewise::{resources, Binding};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(
    name = "pagewise",
    about = "Browse paged collections served from a JSON fixture"
)]
pub struct Cli {
    /// Fixture file of the form {"<collection>": [records...]}
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every record of a collection, page by page
    List(ListArgs),
    /// Search a searchable collection
    Search(SearchArgs),
    /// Fetch a single record by id
    Get(GetArgs),
    /// Create a record
    Create(CreateArgs),
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    pub collection: CollectionName,

    /// Records per page
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Scope parameter, e.g. --scope organization_id=1
    #[arg(long = "scope", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub scopes: Vec<(String, Value)>,

    /// Stop after this many records
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Query of field:value terms, e.g. "name:acme* tags:beta"
    pub query: String,

    /// Collection to search
    #[arg(long = "in", default_value = "organizations")]
    pub collection: CollectionName,

    /// Records per page
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Debug, clap::Args)]
pub struct GetArgs {
    pub collection: CollectionName,

    /// Record id
    pub id: String,

    /// Scope parameter, e.g. --scope category_id=3
    #[arg(long = "scope", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub scopes: Vec<(String, Value)>,
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    pub collection: CollectionName,

    /// Attributes of the new record
    #[arg(value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub attributes: Vec<(String, Value)>,

    /// Scope parameter, e.g. --scope category_id=3
    #[arg(long = "scope", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub scopes: Vec<(String, Value)>,
}

/// Collections the CLI knows about. Each is stored under its own name in the
/// fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionName {
    Organizations,
    Users,
    Memberships,
    Categories,
    Sections,
}

impl CollectionName {
    pub fn binding(self) -> &'static Binding {
        match self {
            CollectionName::Organizations => &resources::ORGANIZATIONS,
            CollectionName::Users => &resources::USERS,
            CollectionName::Memberships => &resources::MEMBERSHIPS,
            CollectionName::Categories => &resources::CATEGORIES,
            CollectionName::Sections => &resources::SECTIONS,
        }
    }

    pub fn store_key(self) -> &'static str {
        match self {
            CollectionName::Organizations => "organizations",
            CollectionName::Users => "users",
            CollectionName::Memberships => "memberships",
            CollectionName::Categories => "categories",
            CollectionName::Sections => "sections",
        }
    }

    pub fn all() -> [CollectionName; 5] {
        [
            CollectionName::Organizations,
            CollectionName::Users,
            CollectionName::Memberships,
            CollectionName::Categories,
            CollectionName::Sections,
        ]
    }
}

/// Parses `key=value`. The value is read as JSON when it parses (numbers,
/// booleans, null) and kept as a string otherwise.
pub fn parse_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pairs_parse_json_or_string() {
        assert_eq!(parse_pair("id=7"), Ok(("id".into(), json!(7))));
        assert_eq!(parse_pair("name=Acme Corp"), Ok(("name".into(), json!("Acme Corp"))));
        assert_eq!(parse_pair("note=a=b"), Ok(("note".into(), json!("a=b"))));
        assert_eq!(parse_pair("empty="), Ok(("empty".into(), json!(""))));
        assert!(parse_pair("=1").is_err());
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn parses_list_with_scopes() {
        let cli = Cli::parse_from([
            "pagewise",
            "--fixture",
            "data.json",
            "list",
            "memberships",
            "--scope",
            "organization_id=1",
            "--per-page",
            "2",
        ]);
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.collection, CollectionName::Memberships);
                assert_eq!(args.per_page, Some(2));
                assert_eq!(args.scopes, [("organization_id".to_string(), json!(1))]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn store_keys_follow_collection_roots() {
        for name in CollectionName::all() {
            assert!(name.binding().collection_root.ends_with(name.store_key()));
        }
    }
}
