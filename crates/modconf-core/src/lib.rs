//! Per-module facet settings for the modconf toolchain.
//!
//! A [`FacetSettings`] owns one module's compiler configuration: the
//! structured arguments, free-form override text, and the merged arguments
//! derived from both. The merged value is recomputed on every write, never
//! lazily.
//!
//! Supporting pieces:
//! - [`VersionView`]: pinned vs. auto-advancing language/API levels
//! - [`CoroutineSupport`]: the coroutine feature state derived from arguments
//! - [`FacetSettingsProvider`]: per-module lookup, in memory or on disk

pub mod coroutines;
pub mod error;
pub mod facet;
pub mod persist;
pub mod provider;
pub mod settings;
pub mod version_view;

pub use coroutines::CoroutineSupport;
pub use error::{Result, SettingsError};
pub use facet::{FacetSettings, ModuleKind};
pub use persist::{
    discover_facets, facet_path, facet_to_toml, load_facet_toml, parse_facet_toml, save_facet_toml, FacetDocument,
};
pub use provider::{FacetProject, FacetSettingsProvider, InMemoryFacetProvider};
pub use settings::CompilerSettings;
pub use version_view::{ArgumentVersionViews, VersionView};
