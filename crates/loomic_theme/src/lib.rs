//! Loomic Theme Engine
//!
//! Named HSL palettes, derived design tokens, and theme synchronization
//! between a page and its embedded preview contexts.
//!
//! # Overview
//!
//! - **Palettes**: [`ThemeRegistry`] holds ordered [`Theme`]s, each with a
//!   light and a dark [`ColorSet`]
//! - **Derivation**: [`derive`] turns a palette into a [`DerivedTokenSet`]
//!   (hover, subtle and surface variants)
//! - **Application**: [`apply`] writes tokens into a per-context
//!   [`StyleScope`]
//! - **Synchronization**: an [`Owner`] persists and broadcasts selections;
//!   [`Follower`]s re-derive on broadcast or on startup
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use loomic_theme::{BroadcastChannel, ColorScheme, Follower, MemoryStore, Owner, ThemeRegistry};
//!
//! let registry = Arc::new(ThemeRegistry::builtin());
//! let store = MemoryStore::new();
//! let channel = BroadcastChannel::new();
//!
//! let mut preview = Follower::new(registry.clone(), store.clone(), &channel, ColorScheme::Dark);
//! preview.start();
//!
//! let mut page = Owner::new(registry, store, channel, ColorScheme::Dark);
//! page.select("ocean");
//!
//! preview.pump();
//! assert_eq!(preview.active_key(), Some("ocean"));
//! assert_eq!(preview.scope().property("--clr-primary-hover"), Some("200 100% 65%"));
//! ```

pub mod channel;
pub mod derive;
pub mod error;
pub mod presets;
pub mod preview;
pub mod registry;
pub mod scope;
pub mod storage;
pub mod sync;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use channel::{
    BroadcastChannel, BroadcastSubscription, ThemeChangePayload, ThemeChannel, ThemeSignal,
    ThemeSubscription,
};
pub use derive::{derive, derive_with, LightnessPolicy};
pub use error::{Result, ThemeError};
pub use presets::{preset_theme, ThemePreset};
pub use preview::{apply_preview_base, parse_preview_url, preview_url, PreviewParams};
pub use registry::{ThemeRegistry, DEFAULT_THEME_KEY};
pub use scope::{apply, ApplyVariant, StyleScope};
pub use storage::{
    read_or_none, FileStore, MemoryStore, ThemeStore, AUTH_TOKEN_STORAGE_KEY, THEME_STORAGE_KEY,
};
pub use sync::{ContextOptions, Follower, Owner, SyncState, ThemeContext};
pub use theme::{ColorScheme, ColorSet, ModePreference, Theme};
pub use tokens::*;
