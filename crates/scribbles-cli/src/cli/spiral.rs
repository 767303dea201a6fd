//! `spiral` - a nautilus made of one scribble redrawn around a point.
//!
//! Generate an asymmetric curvy scribble and stretch it horizontally. Then
//! redraw it again and again, each copy shifted left and rotated a little
//! further, with a drifting color.

use anyhow::Result;
use clap::Args;

use scribbles::color::jitter_channel;
use scribbles::{Point, PointTransformer, Rgb, RuleSpec, Stroke, Variant};

use super::common::{Defaults, GlobalArgs};

const DEFAULTS: Defaults = Defaults {
    width: 1100.0,
    height: 1100.0,
    scale: 7.0,
    color: Rgb::new(255, 0, 0),
    background: Rgb::new(70, 70, 70),
};

#[derive(Args, Debug)]
pub struct SpiralArgs {
    /// x coordinate of the origin
    #[arg(short = 'x', long, default_value_t = 30.0, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// y coordinate of the origin
    #[arg(short = 'y', long, default_value_t = -30.0, allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Starting radius
    #[arg(short = 'r', long, default_value_t = 10.0)]
    pub radius: f64,

    /// Maximum length of the scribble
    #[arg(short = 'L', long, default_value_t = 2000.0)]
    pub length: f64,

    /// Rotation between copies (degrees)
    #[arg(short = 'a', long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Leftward shift per copy
    #[arg(short = 'o', long, default_value_t = 2.0)]
    pub x_offset: f64,
}

/// Copies to draw for a rotation step: two full turns.
fn revolutions(angle: f64) -> (usize, f64) {
    let mut angle = angle.abs() % 360.0;
    if angle < 1.0 {
        angle = 360.0;
    }
    (((360.0 / angle).floor() as usize) * 2, angle)
}

pub fn execute(args: SpiralArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("spiral", DEFAULTS)?;
    let mut palette = session.palette_rng();

    // ((a + U{1..5}) * U{1..2}) mod 360
    let angle_rule = RuleSpec::jitter(1, 5)
        .then(RuleSpec::scale_jitter(1, 2))
        .then(RuleSpec::wrap(360.0))
        .compile(palette.next_u64())?;
    let points = session
        .generator(Variant::Curvy, Point::new(args.origin_x, args.origin_y))
        .with_angle_rule(angle_rule)
        .get_points(args.radius, args.length);
    let points = PointTransformer::new().scale(3.0, 1.0).transform(&points);

    let mut color = session.color;
    session.draw(&points, &Stroke::new(color, 1.0));

    let (copies, angle) = revolutions(args.angle);
    let x_offset = args.x_offset.max(1.0);
    log::info!("Drawing {} copies, {}° apart", copies, angle);
    for i in 0..copies {
        let copy = PointTransformer::new()
            .translate(-x_offset * i as f64, 0.0)
            .rotate(i as f64 * angle)
            .transform(&points);
        color = Rgb::from_channels(color.channels().map(|c| jitter_channel(c, 90, 255, 50, &mut palette)));
        session.draw(&copy, &Stroke::new(color, 1.0));
    }

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revolution_counts() {
        assert_eq!(revolutions(15.0), (48, 15.0));
        assert_eq!(revolutions(-90.0), (8, 90.0));
        assert_eq!(revolutions(0.0), (2, 360.0));
        assert_eq!(revolutions(370.0), (72, 10.0));
    }
}
