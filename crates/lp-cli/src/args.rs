//! Command-line arguments for the `lp` tool.

use clap::{Parser, Subcommand};

/// Layout Prompt: render scenes and build image-generation prompts
#[derive(Parser, Debug)]
#[command(name = "lp", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to an editor configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rasterize a scene to PNG
    Export {
        /// Scene file (JSON: `nodes` and optional `relations`)
        input: String,
        #[arg(short, long, default_value = "out.png")]
        output: String,
    },
    /// Write the live canvas view of a scene as SVG
    Svg {
        input: String,
        #[arg(short, long, default_value = "out.svg")]
        output: String,
    },
    /// Print the layout prompt for a scene
    Prompt {
        input: String,
        /// Problem text the layout illustrates
        #[arg(short, long, default_value = "")]
        problem: String,
    },
}
