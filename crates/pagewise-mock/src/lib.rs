//! In-memory mock service for pagewise collections.
//!
//! [`MockService`] implements [`pagewise::Transport`] on top of a
//! [`MockStore`], so collections can be listed, searched, paged and written
//! without a live backend. Bindings are mounted onto store keys; each mounted
//! operation answers the way the remote service would:
//!
//! | operation | answer |
//! |-----------|--------|
//! | list | records matching the scope parameters, one page under `collection_root` |
//! | get | the record under `model_root`, or not-found |
//! | search | records matching the compiled query, one page under `results` |
//! | create | required attributes checked, id assigned, record under `model_root` |
//! | update | changes merged into the stored record |
//! | destroy | record removed, empty body |
//!
//! Every received operation name is logged; see [`MockService::requests`].

mod error;
mod page;
mod service;
mod store;

pub use error::MockError;
pub use page::{paginate, PageRequest, PageLayout, DEFAULT_PER_PAGE};
pub use service::MockService;
pub use store::MockStore;
