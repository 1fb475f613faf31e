//! Subcommand implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use inkboard_core::{codec, BrushSettings, Document, DrawableObject};
use inkboard_renderer::export::{DocumentExporter, ExportConfig, ExportFormat};
use inkboard_renderer::RasterSurface;

use crate::persistence::{default_project_path, read_project_text, write_artifact};
use crate::script::parse_script;
use crate::{CanvasSession, CliArgs, Command, HostConfig, SessionError, SessionResult};

/// Summary of a project's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    /// Brush saved with the project.
    pub brush: BrushSettings,
    /// Total number of objects.
    pub objects: usize,
    /// Number of well-formed strokes.
    pub strokes: usize,
    /// Points across all well-formed strokes.
    pub points: usize,
    /// Count of non-stroke or malformed entries per kind (`<none>` if absent).
    pub other_kinds: BTreeMap<String, usize>,
}

impl ProjectSummary {
    /// Summarize a document.
    #[must_use]
    pub fn of(document: &Document) -> Self {
        let mut summary = Self {
            brush: document.brush().clone(),
            objects: document.len(),
            strokes: 0,
            points: 0,
            other_kinds: BTreeMap::new(),
        };
        for object in document.objects() {
            match object {
                DrawableObject::Stroke(stroke) => {
                    summary.strokes += 1;
                    summary.points += stroke.points.len();
                }
                DrawableObject::Opaque(_) => {
                    let kind = object.kind().unwrap_or("<none>").to_string();
                    *summary.other_kinds.entry(kind).or_default() += 1;
                }
            }
        }
        summary
    }
}

impl std::fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "brush:   {} @ {}px", self.brush.color, self.brush.size)?;
        writeln!(f, "objects: {}", self.objects)?;
        writeln!(f, "strokes: {} ({} points)", self.strokes, self.points)?;
        for (kind, count) in &self.other_kinds {
            writeln!(f, "other:   {kind} x{count}")?;
        }
        Ok(())
    }
}

/// Image bytes for the session's current document.
///
/// PNG output reuses the pixels the session already rendered; SVG is
/// written from the objects.
fn image_bytes(
    config: &HostConfig,
    session: &CanvasSession<RasterSurface>,
    format: ExportFormat,
) -> SessionResult<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Png => session.renderer().surface().to_png(config.background)?,
        ExportFormat::Svg => DocumentExporter::new(ExportConfig {
            width: config.width,
            height: config.height,
            background: config.background,
        })
        .render_to_svg(session.document().objects())
        .into_bytes(),
    };
    Ok(bytes)
}

fn format_for(path: &Path) -> SessionResult<ExportFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ExportFormat::from_extension)
        .ok_or_else(|| {
            SessionError::Config(format!(
                "cannot infer image format from {} (expected .png or .svg)",
                path.display()
            ))
        })
}

/// Replay an input script, then save the project and optionally an image.
///
/// Returns the path the project was saved to.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, a brush event is
/// invalid, or an output cannot be written.
pub async fn replay(
    config: &HostConfig,
    script: &Path,
    output: Option<&Path>,
    image: Option<&Path>,
) -> SessionResult<PathBuf> {
    let image_format = image.map(format_for).transpose()?;
    let events = parse_script(&read_project_text(script).await?)?;
    let mut session = CanvasSession::new(RasterSurface::new(config.width, config.height)?);

    let mut redraws = 0_usize;
    for event in &events {
        if session.apply(event)? {
            redraws += 1;
        }
    }
    tracing::info!(
        events = events.len(),
        redraws,
        objects = session.document().len(),
        "Script replayed"
    );

    let project_path =
        output.map_or_else(|| default_project_path(Path::new(".")), Path::to_path_buf);
    session.save_project_file(&project_path).await?;

    if let (Some(image), Some(format)) = (image, image_format) {
        write_artifact(image, image_bytes(config, &session, format)?).await?;
    }

    Ok(project_path)
}

/// Render a project file to a PNG or SVG image.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or the image cannot be
/// written.
pub async fn render(config: &HostConfig, project: &Path, output: &Path) -> SessionResult<()> {
    let format = format_for(output)?;
    let text = read_project_text(project).await?;
    let document = codec::load(&text, &BrushSettings::default())?;
    let session =
        CanvasSession::with_document(RasterSurface::new(config.width, config.height)?, document);

    let stats = session.last_render();
    if !stats.skipped.is_empty() {
        tracing::warn!(skipped = stats.skipped.len(), "Some objects were not drawn");
    }

    write_artifact(output, image_bytes(config, &session, format)?).await
}

/// Load a project and summarize it.
///
/// # Errors
///
/// Returns an error if the project cannot be read or is not valid.
pub async fn info(project: &Path) -> SessionResult<ProjectSummary> {
    let text = read_project_text(project).await?;
    let document = codec::load(&text, &BrushSettings::default())?;
    Ok(ProjectSummary::of(&document))
}

/// Run the parsed command line. Returns the text to print on stdout.
///
/// The host configuration is only resolved for commands that draw, so
/// `info` ignores surface and background settings.
///
/// # Errors
///
/// Returns the first error from configuration or the command itself.
pub async fn run(args: &CliArgs) -> SessionResult<String> {
    match &args.command {
        Command::Replay {
            script,
            output,
            png,
        } => {
            let config = HostConfig::try_from(args)?;
            let saved = replay(&config, script, output.as_deref(), png.as_deref()).await?;
            Ok(format!("{}\n", saved.display()))
        }
        Command::Render { project, output } => {
            let config = HostConfig::try_from(args)?;
            render(&config, project, output).await?;
            Ok(format!("{}\n", output.display()))
        }
        Command::Info { project } => Ok(info(project).await?.to_string()),
    }
}
