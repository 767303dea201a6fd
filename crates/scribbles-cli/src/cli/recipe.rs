//! Scribble recipes for declarative layer composition.
//!
//! Recipes are YAML files that define layered scribble drawings.
//! Each layer names a variant, its update rules, a transform pipeline and
//! styling. Layers are drawn bottom to top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use scribbles::{
    LengthBudget, Point, PointTransformer, RenderSink, Rgb, RuleSpec, ScribbleGenerator, Stroke, Variant,
};

use super::common::{Defaults, GlobalArgs, Session};

#[derive(Args, Debug)]
pub struct RecipeArgs {
    /// Recipe YAML file
    #[arg(required_unless_present = "example")]
    pub file: Option<PathBuf>,

    /// Print an example recipe and exit
    #[arg(long)]
    pub example: bool,
}

/// A complete recipe defining a layered drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name/title
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Canvas configuration
    pub canvas: Canvas,

    /// Default style applied to all layers (can be overridden)
    #[serde(default)]
    pub defaults: LayerStyle,

    /// Ordered list of layers (rendered bottom to top)
    pub layers: Vec<Layer>,
}

/// Canvas/output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels
    pub width: f64,

    /// Height in pixels
    pub height: f64,

    /// Scribble units to pixels
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Background color (default: white)
    #[serde(default = "default_background")]
    pub background: Rgb,
}

fn default_scale() -> f64 {
    1.0
}

fn default_background() -> Rgb {
    Rgb::WHITE
}

/// A single scribble layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name (for identification)
    pub name: String,

    pub variant: Variant,

    #[serde(default)]
    pub origin: Point,

    #[serde(default = "default_radius")]
    pub radius: f64,

    #[serde(default = "default_length")]
    pub length: f64,

    /// Angle rule (default: `a + U{1..50}`)
    #[serde(default)]
    pub angle_rule: Option<RuleSpec>,

    /// Radius rule (default: `|r + U{-3..3}|`)
    #[serde(default)]
    pub radius_rule: Option<RuleSpec>,

    #[serde(default)]
    pub budget: LengthBudget,

    #[serde(default)]
    pub bezier_steps: Option<usize>,

    /// Fixed seed for this layer's rules
    #[serde(default)]
    pub seed: Option<u64>,

    /// Applied in order after generation
    #[serde(default)]
    pub transforms: PointTransformer,

    /// Layer style (merged with defaults)
    #[serde(default)]
    pub style: LayerStyle,

    /// Whether this layer is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_radius() -> f64 {
    10.0
}

fn default_length() -> f64 {
    250.0
}

fn default_enabled() -> bool {
    true
}

/// Style properties for a layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stroke color
    #[serde(default)]
    pub color: Option<Rgb>,

    /// Stroke width
    #[serde(default)]
    pub stroke_width: Option<f64>,

    /// Fill color; filled layers are drawn as closed shapes
    #[serde(default)]
    pub fill: Option<Rgb>,
}

impl LayerStyle {
    /// Merge this style with defaults, preferring self's values.
    pub fn merge_with(&self, defaults: &LayerStyle) -> LayerStyle {
        LayerStyle {
            color: self.color.or(defaults.color),
            stroke_width: self.stroke_width.or(defaults.stroke_width),
            fill: self.fill.or(defaults.fill),
        }
    }

    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.color.unwrap_or(Rgb::BLACK), self.stroke_width.unwrap_or(1.0))
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse recipe {}", path.display()))
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        let recipe: Recipe = serde_yaml::from_str(yaml)?;
        for layer in &recipe.layers {
            for rule in layer.angle_rule.iter().chain(&layer.radius_rule) {
                rule.validate()
                    .with_context(|| format!("Layer '{}'", layer.name))?;
            }
        }
        Ok(recipe)
    }

    /// Canvas settings as command defaults (flags still win).
    pub fn defaults(&self) -> Defaults {
        Defaults {
            width: self.canvas.width,
            height: self.canvas.height,
            scale: self.canvas.scale,
            color: self.defaults.color.unwrap_or(Rgb::BLACK),
            background: self.canvas.background,
        }
    }

    fn generator(&self, layer: &Layer, seed: u64) -> Result<ScribbleGenerator> {
        let mut generator = ScribbleGenerator::seeded(layer.variant, layer.origin, seed).with_budget(layer.budget);
        if let Some(steps) = layer.bezier_steps {
            generator = generator.with_bezier_steps(steps);
        }
        if let Some(rule) = &layer.angle_rule {
            generator = generator.with_angle_rule(rule.compile(seed)?);
        }
        if let Some(rule) = &layer.radius_rule {
            generator = generator.with_radius_rule(rule.compile(seed.wrapping_add(1))?);
        }
        Ok(generator)
    }

    /// Draw every enabled layer. Returns the number of layers drawn.
    pub fn render(&self, session: &mut Session) -> Result<usize> {
        let mut drawn = 0;
        for layer in self.layers.iter().filter(|l| l.enabled) {
            let seed = layer.seed.unwrap_or_else(|| session.rng.random());
            let points = self.generator(layer, seed)?.get_points(layer.radius, layer.length);
            let points = layer.transforms.transform(&points);
            let scaled = session.to_canvas().transform(&points);

            let style = layer.style.merge_with(&self.defaults);
            let mut stroke = style.stroke();
            if layer.style.color.is_none() && self.defaults.color.is_none() {
                stroke.color = session.color;
            }
            match style.fill {
                Some(fill) => session.canvas.fill_path(&scaled, fill, &stroke),
                None => session.canvas.draw_path(&scaled, &stroke),
            }
            log::debug!("Layer '{}': {} points, seed {}", layer.name, points.len(), seed);
            drawn += 1;
        }
        Ok(drawn)
    }
}

/// Execute the recipe command.
pub fn execute(args: RecipeArgs, global: &GlobalArgs) -> Result<()> {
    if args.example {
        print!("{}", EXAMPLE);
        return Ok(());
    }
    let Some(path) = args.file else {
        bail!("No recipe file specified");
    };

    log::info!("Loading recipe: {}", path.display());
    let recipe = Recipe::load(&path)?;
    log::info!("Recipe: {} ({} layers)", recipe.name, recipe.layers.len());

    let mut session = global.session("recipe", recipe.defaults())?;
    let drawn = recipe.render(&mut session)?;
    log::info!("Drew {} layers", drawn);

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}

const EXAMPLE: &str = r##"# Example scribbles recipe
name: "Three knots"
description: "One of each variant, side by side"

canvas:
  width: 900      # pixels
  height: 400
  scale: 4        # scribble units -> pixels
  background: "white"

defaults:
  color: "#333333"
  stroke_width: 1.5

layers:
  - name: linear_knot
    variant: linear
    origin: { x: -70, y: 0 }
    radius: 5
    length: 250

  - name: bunched_knot
    variant: bunched
    radius: 5
    length: 250
    angle_rule: { kind: jitter, min: 229, max: 286 }
    radius_rule: { kind: offset, by: 0.5 }
    style:
      color: "steelblue"

  - name: curvy_knot
    variant: curvy
    radius: 5
    length: 250
    angle_rule:
      kind: chain
      steps:
        - { kind: jitter, min: 1, max: 5 }
        - { kind: wrap, modulus: 180 }
    transforms:
      - { op: scale, sx: 1.5, sy: 1 }
      - { op: translate, dx: 70, dy: 0 }
    style:
      color: "#aa3300"
      stroke_width: 2
"##;
