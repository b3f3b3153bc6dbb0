//! Cross-context theme synchronization
//!
//! One **owner** context (where the user picks a theme) and any number of
//! **follower** contexts (embedded previews, other tabs) converge on the same
//! theme without sharing memory:
//!
//! 1. The owner persists the selected key to a [`ThemeStore`].
//! 2. The owner publishes [`ThemeSignal::Changed`] on a [`ThemeChannel`].
//! 3. The owner derives and applies tokens to its own [`StyleScope`].
//!
//! A follower re-derives when it receives a signal, and on startup reads the
//! persisted key so it catches up even if it missed every broadcast.
//! Unknown or missing keys resolve to the registry default; nothing in this
//! path fails.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::channel::{ThemeChangePayload, ThemeChannel, ThemeSignal, ThemeSubscription};
use crate::derive::{derive_with, LightnessPolicy};
use crate::preview::{apply_preview_base, PreviewParams};
use crate::registry::ThemeRegistry;
use crate::scope::{apply, ApplyVariant, StyleScope};
use crate::storage::{read_or_none, ThemeStore, THEME_STORAGE_KEY};
use crate::theme::ColorScheme;
use crate::tokens::DerivedTokenSet;

/// How a context renders tokens into its scope
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextOptions {
    /// Which tokens are written
    pub variant: ApplyVariant,
    /// Out-of-range lightness handling
    pub policy: LightnessPolicy,
    /// Storage key holding the theme selection
    pub storage_key: String,
    /// Pin preview base colors after each apply
    pub preview_base: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::full()
    }
}

impl ContextOptions {
    /// Top-level page: every token, including base and surface colors
    pub fn full() -> Self {
        Self {
            variant: ApplyVariant::Full,
            policy: LightnessPolicy::default(),
            storage_key: THEME_STORAGE_KEY.to_string(),
            preview_base: false,
        }
    }

    /// Embedded preview: brand tokens only, preview base colors
    pub fn preview() -> Self {
        Self {
            variant: ApplyVariant::BrandOnly,
            preview_base: true,
            ..Self::full()
        }
    }

    pub fn with_policy(mut self, policy: LightnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

/// Rendering state of one context: its scope, scheme and active theme
#[derive(Debug)]
pub struct ThemeContext {
    registry: Arc<ThemeRegistry>,
    options: ContextOptions,
    scheme: ColorScheme,
    scope: StyleScope,
    active: Option<String>,
    tokens: Option<DerivedTokenSet>,
    generation: u64,
}

impl ThemeContext {
    pub fn new(registry: Arc<ThemeRegistry>, scheme: ColorScheme, options: ContextOptions) -> Self {
        Self {
            registry,
            options,
            scheme,
            scope: StyleScope::new(),
            active: None,
            tokens: None,
            generation: 0,
        }
    }

    /// Resolve `key`, derive for the current scheme and apply.
    ///
    /// Returns the key actually applied (the default key when `key` is
    /// unknown or absent).
    pub fn activate(&mut self, key: Option<&str>) -> &str {
        let registry = Arc::clone(&self.registry);
        let theme = registry.resolve(key);
        let tokens = derive_with(theme.colors(self.scheme), self.scheme, self.options.policy);

        apply(&tokens, &mut self.scope, self.options.variant);
        if self.options.preview_base {
            apply_preview_base(&mut self.scope, self.scheme);
        } else {
            self.scope.set_scheme_class(self.scheme);
        }

        self.generation += 1;
        debug!(
            "ThemeContext::activate - {} ({}, generation {})",
            theme.key, self.scheme, self.generation
        );

        self.tokens = Some(tokens);
        self.active.insert(theme.key.clone())
    }

    /// Switch scheme and re-apply the active theme.
    ///
    /// Before the first activation only the scheme is recorded.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        if self.scheme == scheme {
            return;
        }
        debug!("ThemeContext::set_scheme - {} -> {}", self.scheme, scheme);
        self.scheme = scheme;
        if let Some(active) = self.active.take() {
            self.activate(Some(&active));
        }
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn scope(&self) -> &StyleScope {
        &self.scope
    }

    /// Key of the applied theme, `None` before the first activation
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Tokens last applied, `None` before the first activation
    pub fn tokens(&self) -> Option<&DerivedTokenSet> {
        self.tokens.as_ref()
    }

    /// Number of activations so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The context where theme selection happens
#[derive(Debug)]
pub struct Owner<S, C> {
    context: ThemeContext,
    store: S,
    channel: C,
}

impl<S: ThemeStore, C: ThemeChannel> Owner<S, C> {
    pub fn new(registry: Arc<ThemeRegistry>, store: S, channel: C, scheme: ColorScheme) -> Self {
        Self::with_options(registry, store, channel, scheme, ContextOptions::full())
    }

    pub fn with_options(
        registry: Arc<ThemeRegistry>,
        store: S,
        channel: C,
        scheme: ColorScheme,
        options: ContextOptions,
    ) -> Self {
        Self {
            context: ThemeContext::new(registry, scheme, options),
            store,
            channel,
        }
    }

    /// Apply the persisted selection (or the default) without broadcasting
    pub fn start(&mut self) -> &str {
        let saved = read_or_none(&self.store, &self.context.options.storage_key);
        self.context.activate(saved.as_deref())
    }

    /// Select a theme: persist, broadcast, then apply locally.
    ///
    /// Unknown keys resolve to the default theme first, so storage and
    /// followers only ever see registered keys.
    pub fn select(&mut self, key: &str) -> &str {
        let resolved = self.context.registry.resolve(Some(key)).key.clone();
        debug!("Owner::select - {:?} -> {}", key, resolved);

        if let Err(err) = self
            .store
            .set_item(&self.context.options.storage_key, &resolved)
        {
            warn!("failed to persist theme {:?}: {}", resolved, err);
        }
        self.channel
            .publish(ThemeSignal::Changed(ThemeChangePayload::new(resolved.clone())));

        self.context.activate(Some(&resolved))
    }

    /// Switch light/dark and re-apply the current theme locally.
    ///
    /// Before [`Owner::start`] this applies the persisted selection.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.context.set_scheme(scheme);
        if self.context.active_key().is_none() {
            self.start();
        }
    }

    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    pub fn scope(&self) -> &StyleScope {
        self.context.scope()
    }

    pub fn active_key(&self) -> Option<&str> {
        self.context.active_key()
    }

    pub fn tokens(&self) -> Option<&DerivedTokenSet> {
        self.context.tokens()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

/// Follower synchronization state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// Created but nothing applied yet
    #[default]
    Unsynced,
    /// Tokens applied from storage or a signal
    Synced,
}

/// A context that mirrors the owner's selection
pub struct Follower<S, C: ThemeChannel> {
    context: ThemeContext,
    store: S,
    subscription: C::Subscription,
    state: SyncState,
    seed: Option<String>,
}

impl<S: ThemeStore, C: ThemeChannel> Follower<S, C> {
    /// Create a follower; it listens on `channel` from this point on
    pub fn new(registry: Arc<ThemeRegistry>, store: S, channel: &C, scheme: ColorScheme) -> Self {
        Self::with_options(registry, store, channel, scheme, ContextOptions::full())
    }

    pub fn with_options(
        registry: Arc<ThemeRegistry>,
        store: S,
        channel: &C,
        scheme: ColorScheme,
        options: ContextOptions,
    ) -> Self {
        Self {
            context: ThemeContext::new(registry, scheme, options),
            store,
            subscription: channel.subscribe(),
            state: SyncState::Unsynced,
            seed: None,
        }
    }

    /// Preview follower seeded from its URL parameters.
    ///
    /// [`Follower::start`] applies the URL's theme instead of reading storage.
    pub fn from_preview(
        registry: Arc<ThemeRegistry>,
        store: S,
        channel: &C,
        params: &PreviewParams,
    ) -> Self {
        let mut follower =
            Self::with_options(registry, store, channel, params.scheme, ContextOptions::preview());
        follower.seed = Some(params.theme.clone());
        follower
    }

    /// Initial sync: apply the seeded or persisted key, else the default
    pub fn start(&mut self) -> &str {
        let key = self.seed.take().or_else(|| self.read_persisted());
        self.sync_to(key.as_deref())
    }

    /// React to one signal. Returns whether tokens were re-applied.
    pub fn handle(&mut self, signal: ThemeSignal) -> bool {
        let key = match signal {
            ThemeSignal::Changed(ThemeChangePayload { theme: Some(theme) }) => Some(theme),
            ThemeSignal::Changed(ThemeChangePayload { theme: None }) => self.read_persisted(),
            ThemeSignal::StorageChanged {
                key,
                new_value: Some(value),
            } if key == self.context.options.storage_key => Some(value),
            ThemeSignal::StorageChanged { .. } => return false,
        };
        self.sync_to(key.as_deref());
        true
    }

    /// Handle every pending signal without blocking.
    ///
    /// Returns how many signals led to a re-apply.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(signal) = self.subscription.try_recv() {
            if self.handle(signal) {
                applied += 1;
            }
        }
        applied
    }

    /// Switch light/dark and re-apply the current theme.
    ///
    /// An unsynced follower performs its startup read instead, so it never
    /// settles on the default while a selection is persisted.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.context.set_scheme(scheme);
        if self.state == SyncState::Unsynced {
            self.start();
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    pub fn scope(&self) -> &StyleScope {
        self.context.scope()
    }

    pub fn active_key(&self) -> Option<&str> {
        self.context.active_key()
    }

    pub fn tokens(&self) -> Option<&DerivedTokenSet> {
        self.context.tokens()
    }

    /// Mutable access to the subscription, e.g. to await signals directly
    pub fn subscription_mut(&mut self) -> &mut C::Subscription {
        &mut self.subscription
    }

    fn read_persisted(&self) -> Option<String> {
        read_or_none(&self.store, &self.context.options.storage_key)
    }

    fn sync_to(&mut self, key: Option<&str>) -> &str {
        if self.state == SyncState::Unsynced {
            debug!("Follower - Unsynced -> Synced");
        }
        self.state = SyncState::Synced;
        self.context.activate(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::BroadcastChannel;
    use crate::storage::MemoryStore;
    use crate::tokens::{ColorToken, Hsl};

    fn registry() -> Arc<ThemeRegistry> {
        Arc::new(ThemeRegistry::builtin())
    }

    #[test]
    fn context_reports_generation_and_tokens() {
        let mut ctx = ThemeContext::new(registry(), ColorScheme::Light, ContextOptions::full());
        assert_eq!(ctx.active_key(), None);
        assert_eq!(ctx.tokens(), None);

        assert_eq!(ctx.activate(Some("forest")), "forest");
        assert_eq!(ctx.generation(), 1);
        assert_eq!(ctx.scope().scheme_class(), Some(ColorScheme::Light));

        ctx.set_scheme(ColorScheme::Light);
        assert_eq!(ctx.generation(), 1);
        ctx.set_scheme(ColorScheme::Dark);
        assert_eq!(ctx.generation(), 2);
        assert_eq!(ctx.active_key(), Some("forest"));
        assert_eq!(ctx.tokens().map(|t| t.scheme), Some(ColorScheme::Dark));
    }

    #[test]
    fn set_scheme_before_activation_only_records_scheme() {
        let mut ctx = ThemeContext::new(registry(), ColorScheme::Dark, ContextOptions::full());
        ctx.set_scheme(ColorScheme::Light);
        assert_eq!(ctx.active_key(), None);
        assert_eq!(ctx.generation(), 0);
        assert_eq!(ctx.activate(None), "default");
        assert_eq!(ctx.tokens().map(|t| t.scheme), Some(ColorScheme::Light));
    }

    #[test]
    fn unsynced_follower_set_scheme_reads_storage() {
        let store = MemoryStore::new();
        store.set_item(THEME_STORAGE_KEY, "ocean").unwrap();
        let channel = BroadcastChannel::new();
        let mut follower = Follower::new(registry(), store, &channel, ColorScheme::Dark);

        follower.set_scheme(ColorScheme::Light);
        assert_eq!(follower.state(), SyncState::Synced);
        assert_eq!(follower.active_key(), Some("ocean"));
        assert_eq!(
            follower.scope().token(ColorToken::Primary),
            Some(Hsl::new(200.0, 100.0, 45.0))
        );
    }

    #[test]
    fn owner_set_scheme_before_start_reads_storage() {
        let store = MemoryStore::new();
        store.set_item(THEME_STORAGE_KEY, "sunset").unwrap();
        let channel = BroadcastChannel::new();
        let mut sub = channel.subscribe();
        let mut owner = Owner::new(registry(), store, channel.clone(), ColorScheme::Dark);

        owner.set_scheme(ColorScheme::Light);
        assert_eq!(owner.active_key(), Some("sunset"));
        assert_eq!(owner.tokens().map(|t| t.scheme), Some(ColorScheme::Light));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn owner_start_does_not_broadcast() {
        let store = MemoryStore::new();
        store.set_item(THEME_STORAGE_KEY, "sunset").unwrap();
        let channel = BroadcastChannel::new();
        let mut sub = channel.subscribe();

        let mut owner = Owner::new(registry(), store, channel.clone(), ColorScheme::Dark);
        assert_eq!(owner.start(), "sunset");
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn owner_select_unknown_persists_default() {
        let store = MemoryStore::new();
        let channel = BroadcastChannel::new();
        let mut sub = channel.subscribe();
        let mut owner = Owner::new(registry(), store.clone(), channel, ColorScheme::Light);

        assert_eq!(owner.select("nonexistent-theme"), "default");
        assert_eq!(
            store.get_item(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("default")
        );
        assert_eq!(sub.try_recv(), Some(ThemeSignal::changed("default")));
    }

    struct ReadOnlyStore;

    impl ThemeStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> crate::Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> crate::Result<()> {
            Err(crate::ThemeError::Storage("read-only".into()))
        }

        fn remove_item(&self, _key: &str) -> crate::Result<()> {
            Err(crate::ThemeError::Storage("read-only".into()))
        }
    }

    #[test]
    fn owner_select_survives_store_failure() {
        let channel = BroadcastChannel::new();
        let mut sub = channel.subscribe();
        let mut owner = Owner::new(registry(), ReadOnlyStore, channel, ColorScheme::Dark);

        assert_eq!(owner.select("forest"), "forest");
        assert_eq!(owner.active_key(), Some("forest"));
        assert_eq!(sub.try_recv(), Some(ThemeSignal::changed("forest")));
    }

    #[test]
    fn follower_ignores_unrelated_storage_keys() {
        let store = MemoryStore::new();
        let channel = BroadcastChannel::new();
        let mut follower = Follower::new(registry(), store, &channel, ColorScheme::Dark);

        assert!(!follower.handle(ThemeSignal::StorageChanged {
            key: "loomic_auth_token".to_string(),
            new_value: Some("abc".to_string()),
        }));
        assert!(!follower.handle(ThemeSignal::StorageChanged {
            key: THEME_STORAGE_KEY.to_string(),
            new_value: None,
        }));
        assert_eq!(follower.state(), SyncState::Unsynced);

        assert!(follower.handle(ThemeSignal::StorageChanged {
            key: THEME_STORAGE_KEY.to_string(),
            new_value: Some("ocean".to_string()),
        }));
        assert_eq!(follower.state(), SyncState::Synced);
        assert_eq!(follower.active_key(), Some("ocean"));
    }

    #[test]
    fn payload_without_theme_reads_storage() {
        let store = MemoryStore::new();
        store.set_item(THEME_STORAGE_KEY, "midnight").unwrap();
        let channel = BroadcastChannel::new();
        let mut follower = Follower::new(registry(), store, &channel, ColorScheme::Dark);

        assert!(follower.handle(ThemeSignal::Changed(ThemeChangePayload::default())));
        assert_eq!(follower.active_key(), Some("midnight"));
    }

    #[test]
    fn preview_follower_uses_url_then_signals() {
        let store = MemoryStore::new();
        store.set_item(THEME_STORAGE_KEY, "forest").unwrap();
        let channel = BroadcastChannel::new();
        let params = PreviewParams::new("ocean", ColorScheme::Light);
        let mut follower = Follower::from_preview(registry(), store, &channel, &params);

        assert_eq!(follower.start(), "ocean");
        let scope = follower.scope();
        assert_eq!(scope.token(ColorToken::Primary), Some(Hsl::new(200.0, 100.0, 45.0)));
        assert_eq!(scope.token(ColorToken::Background), Some(Hsl::new(40.0, 15.0, 96.0)));
        assert_eq!(scope.token(ColorToken::Card), None);

        channel.publish(ThemeSignal::changed("crimson"));
        assert_eq!(follower.pump(), 1);
        assert_eq!(follower.active_key(), Some("crimson"));

        follower.set_scheme(ColorScheme::Dark);
        assert_eq!(follower.scope().token(ColorToken::Background), None);
        assert_eq!(
            follower.scope().token(ColorToken::PrimaryHover),
            Some(Hsl::new(335.0, 78.0, 70.0))
        );
    }
}
