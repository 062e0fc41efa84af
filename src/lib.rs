//! countries_rs
//!
//! A small Rust library for looking up one country on the REST Countries API
//! (v3.1), rendering its details, and keeping a persisted list of favorite
//! countries. Pairs with the `countries` CLI and the `countries-gui` window.
//!
//! ### Features
//! - Fetch a country by its full name (`/name/{name}?fullText=true`)
//! - Cache and deduplicate fetches per name on background threads
//! - Render a loading / not-found / detail screen from the result
//! - Toggle favorites stored as a JSON array in local key-value storage
//!
//! ### Example
//! ```no_run
//! use countries_rs::favorites::Favorites;
//! use countries_rs::storage::MemoryStorage;
//! use countries_rs::{Client, view};
//!
//! let client = Client::default();
//! let screen = view::render_result(client.fetch_country("France"), "en");
//! println!("{screen}");
//!
//! let favorites = Favorites::new(MemoryStorage::default());
//! let toggle = favorites.toggle("France")?;
//! println!("{}", toggle.notification("France"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod favorites;
pub mod format;
pub mod models;
pub mod notify;
pub mod query;
pub mod route;
pub mod storage;
pub mod view;

pub use api::{Client, Fetcher};
pub use config::Settings;
pub use error::{FetchError, StoreError};
pub use models::Country;
pub use view::{LoadState, Screen};
