//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plaudit_protocol::Layout;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PLAUDIT_LOG";

#[derive(Parser, Debug)]
#[command(name = "plaudit", version, about = "Render and preview plaudit review widgets")]
pub struct Cli {
    /// Runtime config file (defaults to ./plaudit.json5 or the user config).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a widget to a standalone HTML page.
    Render {
        #[command(flatten)]
        widget: WidgetArgs,

        /// Viewport width in pixels used for responsive layout.
        #[arg(long, default_value_t = 1280.0)]
        width: f32,

        /// Write the page here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Open the written page in a browser (requires --output).
        #[arg(long, requires = "output")]
        open: bool,
    },

    /// Preview a widget as a carousel in the terminal.
    Preview {
        #[command(flatten)]
        widget: WidgetArgs,
    },

    /// Inspect or create the runtime config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug)]
pub struct WidgetArgs {
    /// The widget to display.
    #[arg(long = "widget-id", default_value = "sample")]
    pub widget_id: String,

    /// Layout variant.
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Accent color as a CSS color.
    #[arg(long)]
    pub theme_color: Option<String>,

    /// Disable carousel autoplay.
    #[arg(long)]
    pub no_autoplay: bool,

    /// Use built-in sample reviews instead of the API.
    #[arg(long)]
    pub sample: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved runtime config as JSON.
    Show,
    /// Write the default runtime config to the user config directory.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags() {
        let cli = Cli::try_parse_from([
            "plaudit", "render", "--widget-id", "w_1", "--layout", "grid", "--sample", "-o",
            "out.html", "--open",
        ])
        .unwrap();
        let Commands::Render {
            widget,
            output,
            open,
            ..
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(widget.widget_id, "w_1");
        assert_eq!(widget.layout, Some(Layout::Grid));
        assert!(widget.sample);
        assert_eq!(output, Some(PathBuf::from("out.html")));
        assert!(open);
    }

    #[test]
    fn open_requires_output() {
        assert!(Cli::try_parse_from(["plaudit", "render", "--open"]).is_err());
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(Cli::try_parse_from(["plaudit", "preview", "--layout", "spiral"]).is_err());
    }
}
