//! `rain` - rainfall on pavement.
//!
//! A horizontally stretched linear scribble provides the drop positions.
//! From each one a short scribble ends in a vertical stem and a splash; its
//! reflection is mirrored, stretched, tilted -30° and drawn lighter.

use anyhow::Result;
use clap::Args;
use rand::Rng as _;

use scribbles::{Point, PointTransformer, Rgb, RuleSpec, Stroke, Variant};

use super::common::{Defaults, GlobalArgs, Session};

const DEFAULTS: Defaults = Defaults {
    width: 1100.0,
    height: 1100.0,
    scale: 10.0,
    color: Rgb::new(100, 149, 237),
    background: Rgb::BLACK,
};

#[derive(Args, Debug)]
pub struct RainArgs {
    /// Length of the scribble the drops are spread along
    #[arg(short = 'L', long, default_value_t = 10000.0)]
    pub length: f64,

    /// Length of each drop's scribble
    #[arg(long, default_value_t = 10.0)]
    pub drop_length: f64,
}

/// `a + U{1..5}`: slow turns.
fn drizzle() -> RuleSpec {
    RuleSpec::jitter(1, 5)
}

pub fn execute(args: RainArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("rain", DEFAULTS)?;
    let mut palette = session.palette_rng();

    let origins = session
        .generator(Variant::Linear, Point::new(10.0, 10.0))
        .with_angle_rule(drizzle().compile(palette.next_u64())?)
        .get_points(10.0, args.length);
    let origins = PointTransformer::new().scale(3.0, 1.0).transform(&origins);
    log::info!("{} drops", origins.len());

    let reflection = PointTransformer::new()
        .mirror_vertical()
        .scale(1.0, 2.5)
        .rotate(-30.0);
    let mut color = session.color;

    for origin in origins {
        let pen = session.rng.random_range(1..=5) as f64;
        let mut raindrop = session
            .generator(Variant::Linear, origin)
            .with_angle_rule(drizzle().compile(palette.next_u64())?)
            .get_points(10.0, args.drop_length);
        let terminus = raindrop[raindrop.len() - 1];
        let stem = session.rng.random_range(3..=20) as f64;
        raindrop.push(terminus.offset(0.0, stem));

        draw_drop(&mut session, &raindrop, color, pen);
        draw_drop(&mut session, &reflection.transform(&raindrop), color.lighten(50), pen);

        color = color.nearby(40, 20, &mut palette);
    }

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}

fn draw_drop(session: &mut Session, points: &[Point], color: Rgb, pen: f64) {
    session.draw(points, &Stroke::new(color, pen));
    if let Some(end) = points.last() {
        session.dot(*end, pen + 4.0, color);
    }
}
