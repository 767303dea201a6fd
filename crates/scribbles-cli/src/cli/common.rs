//! Common utilities shared across CLI commands.
//!
//! Every drawing command follows the same shape: resolve the global flags
//! against the command's own defaults into a [`Session`], draw on the
//! session's canvas, then [`Session::finish`] to export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};

use scribbles::{Point, PointTransformer, RenderSink, Rgb, ScribbleGenerator, Stroke, SvgCanvas, Variant};

/// Flags every command accepts. Unset values fall back to the command's
/// [`Defaults`].
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Width of the image in pixels
    #[arg(short = 'w', long, global = true)]
    pub width: Option<f64>,

    /// Height of the image in pixels
    #[arg(short = 'H', long, global = true)]
    pub height: Option<f64>,

    /// Scaling factor from scribble units to pixels
    #[arg(short = 's', long, global = true)]
    pub scale: Option<f64>,

    /// Base pen color (any SVG color: "#ff0000", "tomato", "rgb(0,0,0)")
    #[arg(short = 'c', long, global = true)]
    pub color: Option<Rgb>,

    /// Background color
    #[arg(short = 'g', long, global = true)]
    pub bg: Option<Rgb>,

    /// Folder to write images to (created if missing)
    #[arg(short = 'f', long, global = true, default_value = ".")]
    pub folder: PathBuf,

    /// Do not save the image to disk
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Seed for reproducible drawings
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Also render a PNG preview next to the SVG
    #[arg(long, global = true)]
    pub png: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Per-command fallbacks for the global flags.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub color: Rgb,
    pub background: Rgb,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            scale: 8.0,
            color: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

/// Scribble variant as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Linear,
    Bunched,
    Curvy,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Linear => Variant::Linear,
            VariantArg::Bunched => Variant::Bunched,
            VariantArg::Curvy => Variant::Curvy,
        }
    }
}

/// Resolved settings plus the command's random source and canvas.
pub struct Session {
    pub name: &'static str,
    pub scale: f64,
    pub color: Rgb,
    pub canvas: SvgCanvas,
    pub rng: StdRng,
    seed: u64,
    folder: PathBuf,
    quiet: bool,
    png: bool,
}

impl GlobalArgs {
    /// Resolve flags for the command `name`.
    pub fn session(&self, name: &'static str, defaults: Defaults) -> Result<Session> {
        let width = self.width.unwrap_or(defaults.width);
        let height = self.height.unwrap_or(defaults.height);
        let background = self.bg.unwrap_or(defaults.background);
        let canvas = SvgCanvas::new(width, height, background).context("Cannot set up canvas")?;

        let seed = self.seed.unwrap_or_else(|| StdRng::from_os_rng().random());
        log::info!("{}: {}x{} canvas, seed {}", name, width, height, seed);

        Ok(Session {
            name,
            scale: self.scale.unwrap_or(defaults.scale),
            color: self.color.unwrap_or(defaults.color),
            canvas,
            rng: StdRng::seed_from_u64(seed),
            seed,
            folder: self.folder.clone(),
            quiet: self.quiet,
            png: self.png,
        })
    }
}

impl Session {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A generator with default rules seeded from the session.
    pub fn generator(&mut self, variant: Variant, origin: Point) -> ScribbleGenerator {
        ScribbleGenerator::seeded(variant, origin, self.rng.random())
    }

    /// A library RNG seeded from the session (for update rules and colors).
    pub fn palette_rng(&mut self) -> scribbles::Rng {
        scribbles::Rng::new(self.rng.random())
    }

    /// Scribble units to canvas units.
    pub fn to_canvas(&self) -> PointTransformer {
        PointTransformer::new().scale(self.scale, self.scale)
    }

    /// Draw `points` (in scribble units) as an open path.
    pub fn draw(&mut self, points: &[Point], stroke: &Stroke) {
        let scaled = self.to_canvas().transform(points);
        self.canvas.draw_path(&scaled, stroke);
    }

    /// Draw a dot at `center` (in scribble units); `diameter` is in pixels.
    pub fn dot(&mut self, center: Point, diameter: f64, color: Rgb) {
        if let Some(c) = self.to_canvas().transform_point(center) {
            self.canvas.draw_dot(c, diameter, color);
        }
    }

    /// Export the canvas unless `--quiet`. Returns the SVG path written.
    pub fn finish(&self) -> Result<Option<PathBuf>> {
        log::debug!("{}: {} elements drawn", self.name, self.canvas.element_count());
        if self.quiet {
            log::info!("Quiet mode, not saving");
            return Ok(None);
        }

        let path = self.folder.join(export_file_name(self.name));
        self.canvas
            .export(&path)
            .with_context(|| format!("Failed to export {}", self.name))?;

        if self.png {
            render_png(&self.canvas.to_svg(), &path.with_extension("png"))?;
        }
        Ok(Some(path))
    }
}

/// `<command>-<timestamp>.svg`, unique to the millisecond.
pub fn export_file_name(command: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S-%3f");
    format!("{}-{}.svg", command, stamp)
}

/// Rasterize an SVG document with resvg.
pub fn render_png(svg_content: &str, png_path: &Path) -> Result<()> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).context("Failed to parse generated SVG")?;

    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .with_context(|| format!("Cannot create {}x{} pixmap", size.width(), size.height()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;
    log::info!("Wrote {} ({}x{})", png_path.display(), size.width(), size.height());
    Ok(())
}
