//! # Inkboard CLI
//!
//! Command-line host for the drawing surface. It stands in for the browser
//! page: input scripts play the role of the pointer and the brush widgets,
//! project files are read and written through `tokio::fs`, and the surface
//! is a `tiny-skia` raster.
//!
//! ## Usage
//!
//! ```bash
//! inkboard replay strokes.json --output drawing.json --png drawing.png
//! inkboard render drawing.json --output drawing.svg
//! inkboard info drawing.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `HostConfig` - Surface size and background resolved from the arguments
//! - `CanvasSession` - Document, stroke builder and renderer wired together
//! - `commands` - One async function per subcommand

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;
mod error;
pub mod persistence;
pub mod script;
mod session;

pub use error::{SessionError, SessionResult};
pub use script::ScriptEvent;
pub use session::CanvasSession;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inkboard_renderer::Rgba;

/// Command-line arguments for inkboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "inkboard")]
#[command(about = "Freehand drawing surface: replay input, save projects, export images")]
#[command(version)]
pub struct CliArgs {
    /// Surface width in pixels
    #[arg(long, global = true, env = "INKBOARD_WIDTH", default_value = "800")]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, global = true, env = "INKBOARD_HEIGHT", default_value = "600")]
    pub height: u32,

    /// Background color used for exported images
    #[arg(long, global = true, env = "INKBOARD_BACKGROUND", default_value = "#ffffff")]
    pub background: String,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay an input script and save the resulting project
    Replay {
        /// JSON array of press/move/release/brush/clear events
        script: PathBuf,

        /// Project file to write (defaults to ./digital-canvas-project.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export the final drawing as a PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Render a project file to a .png or .svg image
    Render {
        /// Project file to load
        project: PathBuf,

        /// Image to write; the format follows the extension
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print a summary of a project file
    Info {
        /// Project file to inspect
        project: PathBuf,
    },
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Background for exported images.
    pub background: Rgba,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HostConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba::WHITE,
        }
    }
}

impl TryFrom<&CliArgs> for HostConfig {
    type Error = SessionError;

    fn try_from(args: &CliArgs) -> SessionResult<Self> {
        if args.width == 0 || args.height == 0 {
            return Err(SessionError::Config(format!(
                "surface must be non-empty, got {}x{}",
                args.width, args.height
            )));
        }
        let background = Rgba::parse(&args.background).map_err(|e| {
            SessionError::Config(format!("background {:?}: {e}", args.background))
        })?;
        Ok(Self {
            width: args.width,
            height: args.height,
            background,
        })
    }
}
