//! Pagewise - paged, scoped and searchable REST resource collections.
//!
//! A [`Collection`] holds one page of records of a remote resource type,
//! together with the links to the neighbouring pages. Collections can be
//! scoped under a parent (the sections of a category, the memberships of a
//! user), searched with a free-text query, and walked page by page or entry
//! by entry without ever fetching ahead.
//!
//! Every remote call goes through the [`Transport`] seam, named by operation
//! (`get_organizations`, `search_organization`, ...). The `pagewise-mock`
//! crate provides an in-memory implementation.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pagewise::{resources, Attributes, Client, Config};
//!
//! let client = Client::new(transport, Config::default());
//!
//! let mut organizations = client.collection(&resources::ORGANIZATIONS);
//! organizations.all(Attributes::new())?;
//! for record in organizations.each_entry() {
//!     println!("{}", record?.get("name").unwrap_or_default());
//! }
//!
//! let acme = organizations.search("name:acme", Attributes::new())?;
//! ```
//!
//! # Collection Types
//!
//! Collection types are declared as static [`Binding`]s naming the remote
//! operations and the response roots. See [`resources`] for the built-in
//! set.
//!
//! # Pages
//!
//! - `all(params)` loads a page, replacing the records and the cursor.
//! - `next_page()` / `previous_page()` return a fresh collection, or `None`
//!   without any request when there is no link.
//! - `each_page()` / `each_entry()` are lazy and restartable.
//!
//! Search results continue across pages: the next link of a search page
//! carries the query, and following it runs the search again for that page.

mod attributes;
mod binding;
mod client;
mod collection;
mod config;
mod error;
mod link;
mod pages;
mod resource;
pub mod resources;
mod scope;
mod transport;

pub use attributes::{Attributes, Record};
pub use binding::{Binding, SEARCH_ROOT};
pub use client::Client;
pub use collection::{Collection, Lookup};
pub use config::{Config, EnvReader, MockEnv, RealEnv, PER_PAGE_VAR, URL_VAR};
pub use error::{Error, Result};
pub use link::{
    PageCursor, PageLink, COUNT_FIELD, FILTERED_PARAM, NEXT_PAGE_FIELD, PAGE_PARAM,
    PER_PAGE_PARAM, PREVIOUS_PAGE_FIELD, QUERY_PARAM, URL_PARAM,
};
pub use pages::{Entries, Pages};
pub use resource::Resource;
pub use scope::Scope;
pub use transport::{Transport, TransportError};

pub use pagewise_seeker as seeker;
