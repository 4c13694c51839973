//! A debounced catalog autocomplete widget built on a minimal signal layer.
//!
//! The crate has two layers:
//!
//! - A [`Signal`] primitive whose only operation is [`Signal::apply`], and the
//!   operators built from it: [`emit`], [`listen`] and the combinators in
//!   [`operators`] (debounce, distinct, combine-latest, running sum).
//! - The [`Autocomplete`] controller, which turns keystrokes into debounced
//!   catalog searches, keeps stale results out of the dropdown once the field
//!   is cleared, and forwards dropdown clicks to the catalog API.
//!
//! Everything host-specific sits behind traits: the page ([`Window`],
//! [`InputElement`], the container [`Renderer`]), the executor ([`Spawner`]) and
//! the HTTP endpoints ([`CatalogApi`]).
//!
//! ## Example
//!
//! ```rust
//! use catalog_select::operators::{combine_latest, sum};
//! use catalog_select::{emit, listen, Signal};
//!
//! let clicks = Signal::<u32>::new();
//! let totals = clicks.apply(sum);
//! let labels = Signal::<&'static str>::new();
//!
//! let latest = combine_latest(&totals, &labels);
//! latest.apply(listen(|pair: &(Option<u32>, Option<&'static str>)| {
//!     println!("{pair:?}");
//!     Ok(())
//! }));
//!
//! clicks.apply(emit(2)).unwrap();    // (Some(2), None)
//! labels.apply(emit("cart")).unwrap(); // (Some(2), Some("cart"))
//! clicks.apply(emit(3)).unwrap();    // (Some(5), Some("cart"))
//! ```
//!
//! Wiring the widget to a page:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_select::{observability, Autocomplete, Config};
//!
//! let config = Config::default();
//! observability::init_tracing(&config);
//!
//! // `window` implements `Window`, `api` implements `CatalogApi`.
//! let widget = Autocomplete::mount(Arc::new(window), Arc::new(api), spawner, config)?;
//! ```

// Module declarations
mod api;
mod autocomplete;
mod config;
mod dropdown;
mod error;
mod model;
pub mod observability;
pub mod operators;
mod renderer;
mod signal;
mod spawner;
mod timer;
mod window;

// Public re-exports
pub use api::CatalogApi;
pub use autocomplete::Autocomplete;
pub use config::Config;
pub use dropdown::{DropdownView, OptionsDropdown};
pub use error::{Error, Result};
pub use model::{
    parse_identifier, CatalogItem, ItemAction, ItemGroup, OptionsAction, SearchPage, SelectOption,
};
pub use renderer::Renderer;
pub use signal::{emit, listen, Listener, Listeners, Signal};
pub use spawner::{SpawnedFuture, Spawner};
pub use timer::{Scheduler, Task, ThreadScheduler, TimerId, Timeout};
pub use window::{Element, InputElement, Window};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use spawner::{create_test_spawner, TestSpawner};
#[cfg(any(test, feature = "testing"))]
pub use timer::ManualScheduler;
#[cfg(any(test, feature = "testing"))]
pub use window::{TestInput, TestWindow};
