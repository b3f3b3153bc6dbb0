//! Command implementations
//!
//! Every command writes to the given output so it can run against a buffer
//! in tests; `main` passes stdout.

use anyhow::{Context, Result};
use loomic_theme::storage::read_or_none;
use loomic_theme::{
    preview_url, ApplyVariant, BroadcastChannel, ColorScheme, ContextOptions, FileStore,
    Follower, LightnessPolicy, ModePreference, Owner, PreviewParams, ThemeChannel, ThemeContext,
    ThemeRegistry, ThemeSignal, ThemeSubscription,
};
use notify::{Event, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{mpsc, Arc};
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::config::LoomicConfig;

/// Selector used when rendering a scope as CSS
const ROOT_SELECTOR: &str = ":root";

/// Scheme assumed for `--mode system`; a terminal has no OS preference to query
const SYSTEM_SCHEME: ColorScheme = ColorScheme::Dark;

/// Resolve a mode preference to a concrete scheme
pub fn resolve_mode(mode: ModePreference) -> ColorScheme {
    mode.resolve(SYSTEM_SCHEME)
}

/// Loaded configuration plus the registry built from it
pub struct App {
    config: LoomicConfig,
    registry: Arc<ThemeRegistry>,
}

impl App {
    pub fn new(config: LoomicConfig) -> Result<Self> {
        let registry = Arc::new(config.registry()?);
        debug!(
            "registry ready: {} themes, default {:?}",
            registry.len(),
            registry.default_key()
        );
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &LoomicConfig {
        &self.config
    }

    /// `loomic themes`
    pub fn themes(&self, out: &mut impl Write) -> Result<()> {
        let width = self.registry.keys().map(str::len).max().unwrap_or(0);
        for theme in self.registry.themes() {
            let marker = if theme.key == self.registry.default_key() {
                '*'
            } else {
                ' '
            };
            writeln!(
                out,
                "{marker} {:<width$}  {:<14}  {}",
                theme.key, theme.name, theme.description
            )?;
        }
        Ok(())
    }

    /// `loomic tokens`
    pub fn tokens(
        &self,
        out: &mut impl Write,
        theme: Option<&str>,
        scheme: ColorScheme,
        variant: ApplyVariant,
        format: OutputFormat,
        legacy: bool,
    ) -> Result<()> {
        if let Some(key) = theme {
            if !self.registry.contains(key) {
                let known: Vec<&str> = self.registry.keys().collect();
                anyhow::bail!("Unknown theme {:?} (available: {})", key, known.join(", "));
            }
        }

        let mut options = self.config.context_options();
        options.variant = variant;
        if legacy {
            options.policy = LightnessPolicy::Legacy;
        }

        let mut context = ThemeContext::new(Arc::clone(&self.registry), scheme, options);
        context.activate(theme);

        match format {
            OutputFormat::Css => write!(out, "{}", context.scope().to_css(ROOT_SELECTOR))?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, context.scope())
                    .context("Failed to serialize tokens")?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// `loomic select`: persist, broadcast, print the payload and CSS
    pub fn select(&self, out: &mut impl Write, theme: &str, scheme: ColorScheme) -> Result<()> {
        if !self.registry.contains(theme) {
            warn!(
                "unknown theme {:?}, falling back to {:?}",
                theme,
                self.registry.default_key()
            );
        }

        let channel = BroadcastChannel::new();
        let mut wire = channel.subscribe();
        let mut owner = Owner::with_options(
            Arc::clone(&self.registry),
            self.store()?,
            channel,
            scheme,
            self.config.context_options(),
        );
        let applied = owner.select(theme).to_string();
        info!("selected {}", applied);

        let persisted = read_or_none(owner.store(), &self.config.theme.storage_key);
        if persisted.as_deref() != Some(applied.as_str()) {
            anyhow::bail!(
                "Failed to persist theme {:?} to {}",
                applied,
                self.config.storage.path.display()
            );
        }

        while let Some(signal) = wire.try_recv() {
            if let ThemeSignal::Changed(payload) = signal {
                writeln!(out, "{}", serde_json::to_string(&payload)?)?;
            }
        }
        write!(out, "{}", owner.scope().to_css(ROOT_SELECTOR))?;
        Ok(())
    }

    /// `loomic current`: follower startup against the persisted selection
    pub fn current(&self, out: &mut impl Write, scheme: ColorScheme) -> Result<()> {
        let channel = BroadcastChannel::new();
        let mut follower = self.follower(&channel, scheme)?;
        let key = follower.start().to_string();
        writeln!(out, "{key}")?;
        write!(out, "{}", follower.scope().to_css(ROOT_SELECTOR))?;
        Ok(())
    }

    /// `loomic watch`: re-derive whenever the storage file changes.
    ///
    /// Runs until the watcher shuts down.
    pub fn watch(&self, out: &mut impl Write, scheme: ColorScheme) -> Result<()> {
        let path = self.config.storage.path.as_path();
        let storage_key = self.config.theme.storage_key.clone();
        let channel = BroadcastChannel::new();
        let mut follower = self.follower(&channel, scheme)?;

        let mut last = Some(follower.start().to_string());
        if let Some(key) = &last {
            writeln!(out, "{key}")?;
        }
        write!(out, "{}", follower.scope().to_css(ROOT_SELECTOR))?;
        out.flush()?;

        let dir = watch_dir(path);
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let file_name = path
            .file_name()
            .with_context(|| format!("Invalid storage path {}", path.display()))?
            .to_os_string();

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(err) => warn!("watch error: {}", err),
        })
        .context("Failed to create file watcher")?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        info!("watching {}", path.display());

        let store = self.store()?;
        for event in rx {
            if !touches(&event, &file_name) {
                continue;
            }
            let value = read_or_none(&store, &storage_key);
            if value.is_none() || value == last {
                continue;
            }
            debug!("storage changed: {:?}", value);

            channel.publish(ThemeSignal::StorageChanged {
                key: storage_key.clone(),
                new_value: value.clone(),
            });
            if follower.pump() > 0 {
                last = value;
                writeln!(out, "{}", follower.active_key().unwrap_or_default())?;
                write!(out, "{}", follower.scope().to_css(ROOT_SELECTOR))?;
                out.flush()?;
            }
        }
        Ok(())
    }

    /// `loomic preview-url`
    pub fn preview_url(
        &self,
        component: Option<&str>,
        theme: Option<&str>,
        scheme: ColorScheme,
    ) -> String {
        let component = component.unwrap_or(self.config.preview.component.as_str());
        let theme = theme.unwrap_or(self.registry.default_key());
        preview_url(
            &self.config.preview.base_url,
            component,
            &PreviewParams::new(theme, scheme),
        )
    }

    fn store(&self) -> Result<FileStore> {
        let path = &self.config.storage.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Ok(FileStore::new(path))
    }

    fn follower(
        &self,
        channel: &BroadcastChannel,
        scheme: ColorScheme,
    ) -> Result<Follower<FileStore, BroadcastChannel>> {
        let options: ContextOptions = self.config.context_options();
        Ok(Follower::with_options(
            Arc::clone(&self.registry),
            self.store()?,
            channel,
            scheme,
            options,
        ))
    }
}

fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Whether a watcher event creates or modifies the file named `file_name`
fn touches(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_create() || event.kind.is_modify())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}
