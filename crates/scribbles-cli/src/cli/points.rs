//! `points` - generate one scribble and print or draw it.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use scribbles::{
    BoundingBox, LengthBudget, Point, PointTransformer, RuleSpec, Stroke, TransformOp, Variant,
};

use super::common::{Defaults, GlobalArgs, VariantArg};

#[derive(Args, Debug)]
pub struct PointsArgs {
    /// Scribble variant
    #[arg(long, value_enum, default_value = "curvy")]
    pub variant: VariantArg,

    /// x coordinate of the origin
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// y coordinate of the origin
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Starting radius
    #[arg(short = 'r', long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub radius: f64,

    /// Maximum path length
    #[arg(short = 'L', long, default_value_t = 250.0, allow_negative_numbers = true)]
    pub length: f64,

    /// Angle rule as YAML, e.g. '{kind: jitter, min: 1, max: 5}'
    #[arg(long)]
    pub angle_rule: Option<String>,

    /// Radius rule as YAML, e.g. '{kind: offset, by: 0.5}'
    #[arg(long)]
    pub radius_rule: Option<String>,

    /// What to do at the length limit
    #[arg(long, value_enum, default_value = "overshoot")]
    pub budget: BudgetArg,

    /// Samples per Bézier curve (minimum 10)
    #[arg(long)]
    pub bezier_steps: Option<usize>,

    /// Transforms applied in order: translate:DX,DY scale:SX,SY rotate:DEG
    /// mirror-h mirror-v clip:X0,Y0,X1,Y1 clamp:X0,Y0,X1,Y1
    #[arg(short = 't', long = "transform", allow_hyphen_values = true)]
    pub transforms: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BudgetArg {
    /// Stop at the first point reaching the limit
    Overshoot,
    /// Never exceed the limit
    Truncate,
}

impl From<BudgetArg> for LengthBudget {
    fn from(b: BudgetArg) -> Self {
        match b {
            BudgetArg::Overshoot => LengthBudget::Overshoot,
            BudgetArg::Truncate => LengthBudget::Truncate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Points as JSON on stdout
    Json,
    /// Drawn and exported as SVG
    Svg,
}

/// What `--format json` prints.
#[derive(Debug, Serialize)]
struct PointsOutput {
    variant: Variant,
    seed: u64,
    length: f64,
    capped: bool,
    points: Vec<Point>,
}

pub fn execute(args: PointsArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("points", Defaults::default())?;
    let variant = Variant::from(args.variant);
    let origin = Point::new(args.origin_x, args.origin_y);

    let mut generator = session
        .generator(variant, origin)
        .with_budget(args.budget.into());
    if let Some(steps) = args.bezier_steps {
        generator = generator.with_bezier_steps(steps);
    }
    if let Some(text) = &args.angle_rule {
        let rule = parse_rule(text)?.compile(session.seed()).context("Invalid --angle-rule")?;
        generator = generator.with_angle_rule(rule);
    }
    if let Some(text) = &args.radius_rule {
        let rule = parse_rule(text)?
            .compile(session.seed().wrapping_add(1))
            .context("Invalid --radius-rule")?;
        generator = generator.with_radius_rule(rule);
    }

    let transformer = args
        .transforms
        .iter()
        .map(|t| parse_op(t))
        .collect::<Result<PointTransformer>>()?;

    let trace = generator.trace(args.radius, args.length);
    let points = transformer.transform(&trace.points);
    log::info!(
        "{} scribble: {} points ({} after transforms), length {:.2}",
        variant, trace.points.len(), points.len(), trace.length
    );

    match args.format {
        OutputFormat::Json => {
            let output = PointsOutput {
                variant,
                seed: session.seed(),
                length: trace.length,
                capped: trace.capped,
                points,
            };
            let json = if args.pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
        OutputFormat::Svg => {
            let stroke = Stroke::new(session.color, 2.0);
            session.draw(&points, &stroke);
            if let Some(path) = session.finish()? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn parse_rule(text: &str) -> Result<RuleSpec> {
    serde_yaml::from_str(text).with_context(|| format!("Cannot parse rule '{}'", text))
}

/// Parse `name` or `name:a,b,...` into a transform op.
pub fn parse_op(text: &str) -> Result<TransformOp> {
    let (name, params) = text.split_once(':').unwrap_or((text, ""));
    let values = params
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse::<f64>().with_context(|| format!("Bad number '{}' in '{}'", s, text)))
        .collect::<Result<Vec<f64>>>()?;

    let expect = |n: usize| -> Result<()> {
        if values.len() != n {
            bail!("'{}' takes {} values, got {}", name, n, values.len());
        }
        Ok(())
    };

    let op = match name.trim() {
        "translate" => {
            expect(2)?;
            TransformOp::Translate { dx: values[0], dy: values[1] }
        }
        "scale" => {
            expect(2)?;
            TransformOp::Scale { sx: values[0], sy: values[1] }
        }
        "rotate" => {
            expect(1)?;
            TransformOp::Rotate { degrees: values[0] }
        }
        "mirror-h" | "mirror_horizontal" => {
            expect(0)?;
            TransformOp::MirrorHorizontal
        }
        "mirror-v" | "mirror_vertical" => {
            expect(0)?;
            TransformOp::MirrorVertical
        }
        "clip" | "clamp" => {
            expect(4)?;
            let bbox = BoundingBox::new(values[0], values[1], values[2], values[3])?;
            if name.trim() == "clip" {
                TransformOp::ClipBox(bbox)
            } else {
                TransformOp::Clamp(bbox)
            }
        }
        other => return Err(anyhow!("Unknown transform '{}'", other)),
    };
    Ok(op)
}
