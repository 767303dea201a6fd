//! `worm` - a coiled worm of overlapping splats.
//!
//! Generate a long curvy scribble and stamp a dot at every point. Dots grow
//! as the worm moves away from the origin and along its length, and the
//! color wanders slowly from dot to dot.

use anyhow::Result;
use clap::Args;

use scribbles::{Point, Rgb, Variant};

use super::common::{Defaults, GlobalArgs};

const DEFAULTS: Defaults = Defaults {
    width: 1000.0,
    height: 800.0,
    scale: 10.0,
    color: Rgb::new(152, 255, 152),
    background: Rgb::new(75, 0, 0),
};

const RAINBOW: Defaults = Defaults {
    color: Rgb::new(255, 0, 0),
    background: Rgb::BLACK,
    ..DEFAULTS
};

#[derive(Args, Debug)]
pub struct WormArgs {
    /// x coordinate of the origin
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// y coordinate of the origin
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Starting radius
    #[arg(short = 'r', long, default_value_t = 10.0)]
    pub radius: f64,

    /// Maximum length of the worm
    #[arg(short = 'L', long, default_value_t = 10000.0)]
    pub length: f64,

    /// Minimum dot diameter in pixels
    #[arg(short = 'd', long, default_value_t = 100.0)]
    pub dotsize: f64,

    /// Let the color drift freely instead of keeping its hue
    #[arg(long)]
    pub rainbow: bool,
}

/// Dot diameter for point `index` of `count`, `distance` from the origin.
///
/// Dots inside the starting radius stay at the minimum size.
pub fn dot_size(minimum: f64, index: usize, count: usize, distance: f64, radius: f64) -> f64 {
    if distance > radius {
        minimum + (index as f64 + distance) * (minimum / count as f64)
    } else {
        minimum
    }
}

pub fn execute(args: WormArgs, global: &GlobalArgs) -> Result<()> {
    let defaults = if args.rainbow { RAINBOW } else { DEFAULTS };
    let mut session = global.session("worm", defaults)?;
    let mut palette = session.palette_rng();

    let origin = Point::new(args.origin_x, args.origin_y);
    let points = session
        .generator(Variant::Curvy, origin)
        .get_points(args.radius, args.length);
    log::info!("Worm of {} segments", points.len());

    let mut color = session.color;
    for (i, point) in points.iter().enumerate() {
        let size = dot_size(args.dotsize, i, points.len(), origin.distance(*point), args.radius);
        session.dot(*point, size, color);
        color = if args.rainbow {
            color.drift(50, &mut palette)
        } else {
            color.nearby(40, 10, &mut palette)
        };
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
    fn dots_grow_outside_the_radius() {
        assert_eq!(dot_size(100.0, 5, 10, 3.0, 10.0), 100.0);
        assert_eq!(dot_size(100.0, 5, 10, 15.0, 10.0), 100.0 + 20.0 * 10.0);
    }
}
