use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use pagewise::{Attributes, Client, Collection, Config, Record, Resource, Scope};
use pagewise_mock::MockService;
use serde_json::Value;

use crate::cli::{CollectionName, Command, CreateArgs, GetArgs, ListArgs, SearchArgs};

/// Builds a mock service holding the fixture and a client over it.
pub fn connect(config: Config, fixture: Option<&Path>) -> Result<Client> {
    let mut service = MockService::new(config.clone());
    for name in CollectionName::all() {
        service.mount(name.binding(), name.store_key());
    }

    if let Some(path) = fixture {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        let loaded = service
            .store()
            .load_str(&raw)
            .with_context(|| format!("loading fixture {}", path.display()))?;
        tracing::info!(records = loaded, fixture = %path.display(), "fixture ready");
    }

    Ok(Client::new(Arc::new(service), config))
}

pub fn run(command: Command, client: &Client, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List(args) => list(client, args, out),
        Command::Search(args) => search(client, args, out),
        Command::Get(args) => get(client, args, out),
        Command::Create(args) => create(client, args, out),
    }
}

fn list(client: &Client, args: ListArgs, out: &mut impl Write) -> Result<()> {
    let mut collection = collection(client, args.collection, args.scopes);
    collection.all(page_params(args.per_page))?;

    let entries = collection.each_entry().take(args.limit.unwrap_or(usize::MAX));
    for record in entries {
        write_record(out, &record?)?;
    }
    Ok(())
}

fn search(client: &Client, args: SearchArgs, out: &mut impl Write) -> Result<()> {
    let binding = args.collection.binding();
    if !binding.is_searchable() {
        bail!("{} cannot be searched", args.collection.store_key());
    }

    let mut collection = client.collection(binding);
    collection.search(&args.query, page_params(args.per_page))?;
    for record in collection.each_entry() {
        write_record(out, &record?)?;
    }
    Ok(())
}

fn get(client: &Client, args: GetArgs, out: &mut impl Write) -> Result<()> {
    let id = serde_json::from_str::<Value>(&args.id).unwrap_or(Value::String(args.id));
    let resource = collection(client, args.collection, args.scopes).resolve(id)?;
    write_resource(out, &resource)
}

fn create(client: &Client, args: CreateArgs, out: &mut impl Write) -> Result<()> {
    let attributes: Attributes = args.attributes.into_iter().collect();
    let resource = collection(client, args.collection, args.scopes).create_quiet(attributes)?;

    if resource.is_new_record() {
        bail!(
            "{} was not created: {}",
            resource.binding().name,
            resource.errors().join(", ")
        );
    }
    write_resource(out, &resource)
}

fn collection(client: &Client, name: CollectionName, scopes: Vec<(String, Value)>) -> Collection {
    if scopes.is_empty() {
        client.collection(name.binding())
    } else {
        client.scoped(name.binding(), scopes.into_iter().collect::<Scope>())
    }
}

fn page_params(per_page: Option<usize>) -> Attributes {
    match per_page {
        Some(n) => Attributes::new().with(pagewise::PER_PAGE_PARAM, n),
        None => Attributes::new(),
    }
}

fn write_record(out: &mut impl Write, record: &Record) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(record)?)?;
    Ok(())
}

fn write_resource(out: &mut impl Write, resource: &Resource) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(resource.attributes())?)?;
    Ok(())
}
