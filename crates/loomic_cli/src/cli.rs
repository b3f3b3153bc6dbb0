use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use loomic_theme::{ApplyVariant, ColorScheme, ModePreference};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "loomic")]
#[command(about = "Loomic theme engine - palettes, derived tokens, and theme selection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file path (defaults to ./loomic.toml when present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log level selected by `-v`; `RUST_LOG` still takes precedence
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered themes in declaration order
    Themes,

    /// Derive and print the token set for a theme
    Tokens {
        /// Theme key (defaults to the configured default theme)
        theme: Option<String>,

        /// Color scheme: light, dark or system
        #[arg(short, long, default_value = "system")]
        mode: ModePreference,

        /// Which tokens to print
        #[arg(long, value_enum, default_value_t = VariantArg::Full)]
        variant: VariantArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,

        /// Keep unclamped hover lightness
        #[arg(long)]
        legacy: bool,
    },

    /// Select a theme: persist it and broadcast the change
    Select {
        /// Theme key
        theme: String,

        /// Color scheme: light, dark or system
        #[arg(short, long, default_value = "system")]
        mode: ModePreference,
    },

    /// Print the persisted theme as a follower would apply it on startup
    Current {
        /// Color scheme: light, dark or system
        #[arg(short, long, default_value = "system")]
        mode: ModePreference,
    },

    /// Follow the persisted theme and re-derive whenever it changes
    Watch {
        /// Color scheme: light, dark or system
        #[arg(short, long, default_value = "system")]
        mode: ModePreference,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Build the preview URL for a component
    PreviewUrl {
        /// Component slug (defaults to the configured preview component)
        component: Option<String>,

        /// Theme key
        #[arg(short, long)]
        theme: Option<String>,

        /// Color scheme: light or dark
        #[arg(short, long, default_value = "dark")]
        mode: ColorScheme,
    },
}

/// Token subset to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Brand hues with hover and subtle variants
    Brand,
    /// Every token, including base and surface colors
    Full,
}

impl From<VariantArg> for ApplyVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Brand => ApplyVariant::BrandOnly,
            VariantArg::Full => ApplyVariant::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A CSS rule with custom properties
    Css,
    /// A JSON object of property names to values
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tokens_command() {
        let cli = Cli::parse_from([
            "loomic", "-vv", "tokens", "ocean", "--mode", "dark", "--variant", "brand", "--format",
            "json",
        ]);
        assert_eq!(cli.log_level(), LevelFilter::DEBUG);
        match cli.command {
            Commands::Tokens {
                theme,
                mode,
                variant,
                format,
                legacy,
            } => {
                assert_eq!(theme.as_deref(), Some("ocean"));
                assert_eq!(mode, ModePreference::Dark);
                assert_eq!(ApplyVariant::from(variant), ApplyVariant::BrandOnly);
                assert_eq!(format, OutputFormat::Json);
                assert!(!legacy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["loomic", "current", "--mode", "dim"]).is_err());
    }

    #[test]
    fn preview_url_defaults_to_dark() {
        let cli = Cli::parse_from(["loomic", "preview-url", "glass-morphism"]);
        match cli.command {
            Commands::PreviewUrl { component, theme, mode } => {
                assert_eq!(component.as_deref(), Some("glass-morphism"));
                assert_eq!(theme, None);
                assert_eq!(mode, ColorScheme::Dark);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
