//! `samples` - a 3×3 grid showing every variant with three rule sets.
//!
//! Rows are variants (linear, bunched, curvy), columns are rule sets:
//! the defaults, a wide swing with a steadily growing radius, and small
//! steps wrapped to half a turn.

use anyhow::Result;
use clap::Args;
use rand::Rng as _;

use scribbles::{Point, PointTransformer, RuleSpec, Stroke, Variant};

use super::common::{Defaults, GlobalArgs};

/// Grid cell offsets in scribble units.
const COLUMNS: [f64; 3] = [-35.0, 0.0, 35.0];
const ROWS: [f64; 3] = [40.0, 0.0, -40.0];

#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Starting radius of each sample
    #[arg(short = 'r', long, default_value_t = 5.0)]
    pub radius: f64,

    /// Maximum length of each sample
    #[arg(short = 'L', long, default_value_t = 250.0)]
    pub length: f64,
}

/// The rule pairs of the three columns (`None` = generator defaults).
fn column_rules(column: usize) -> Option<(RuleSpec, RuleSpec)> {
    match column {
        1 => Some((RuleSpec::jitter(229, 286), RuleSpec::offset(0.5))),
        2 => Some((RuleSpec::jitter(1, 5).then(RuleSpec::wrap(180.0)), RuleSpec::Identity)),
        _ => None,
    }
}

pub fn execute(args: SamplesArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("samples", Defaults::default())?;
    let mut color = session.color;

    for (row, variant) in Variant::all().iter().enumerate() {
        for (column, x_offset) in COLUMNS.iter().enumerate() {
            let mut generator = session.generator(*variant, Point::ORIGIN);
            if let Some((angle, radius)) = column_rules(column) {
                generator = generator
                    .with_angle_rule(angle.compile(session.rng.random())?)
                    .with_radius_rule(radius.compile(session.rng.random())?);
            }

            let points = generator.get_points(args.radius, args.length);
            let placed = PointTransformer::new()
                .translate(*x_offset, ROWS[row])
                .transform(&points);
            session.draw(&placed, &Stroke::new(color, 2.0));
            log::debug!("{} sample {}: {} points", variant, column, points.len());

            // Rotate color channels for variety.
            color = color.rotate_channels();
        }
    }

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}
