//! `grass` - a ring of grass blades.
//!
//! A curvy scribble is generated but not drawn; its points (stretched and
//! tilted) are the roots of short curvy blades. Every segment of a blade is
//! a little darker than the one before, and a blade stops once it has faded
//! into the background.

use anyhow::Result;
use clap::Args;

use scribbles::{Point, PointTransformer, Rgb, Stroke, Variant};

use super::common::{Defaults, GlobalArgs, Session};

const DEFAULTS: Defaults = Defaults {
    width: 1000.0,
    height: 800.0,
    scale: 7.0,
    color: Rgb::new(152, 255, 152),
    background: Rgb::new(40, 40, 40),
};

/// Darkening per blade segment.
const FADE: u8 = 4;

#[derive(Args, Debug)]
pub struct GrassArgs {
    /// x coordinate of the origin
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// y coordinate of the origin
    #[arg(short = 'y', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Radius of the ring
    #[arg(short = 'r', long, default_value_t = 10.0)]
    pub radius: f64,

    /// Maximum length of the ring
    #[arg(short = 'L', long, default_value_t = 70.0)]
    pub length: f64,

    /// Horizontal stretch of the ring
    #[arg(long, default_value_t = 4.0)]
    pub xscale: f64,

    /// Pen width
    #[arg(short = 'p', long, default_value_t = 2.0)]
    pub pensize: f64,

    /// Starting radius of each blade
    #[arg(long, default_value_t = 15.0)]
    pub blade_radius: f64,

    /// Maximum length of each blade
    #[arg(long, default_value_t = 50.0)]
    pub blade_length: f64,
}

/// Segment colors for a blade of `segments` segments starting at `color`.
///
/// Stops early once the color has darkened to `floor` on every channel.
pub fn fade(color: Rgb, floor: u8, segments: usize) -> Vec<Rgb> {
    let limit = Rgb::new(floor, floor, floor);
    std::iter::successors(Some(color.darken(floor, FADE)), |c| Some(c.darken(floor, FADE)))
        .take(segments)
        .take_while(|c| *c != limit)
        .collect()
}

pub fn execute(args: GrassArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("grass", DEFAULTS)?;
    let mut palette = session.palette_rng();
    let floor = session.canvas.background().channels().into_iter().min().unwrap_or(0);

    let ring = session
        .generator(Variant::Curvy, Point::new(args.origin_x, args.origin_y))
        .get_points(args.radius, args.length);
    let mut placement = PointTransformer::new();
    if args.xscale > 1.0 {
        placement = placement.scale(args.xscale, 1.0);
    }
    let roots = placement.rotate(-15.0).transform(&ring);
    log::info!("{} blades", roots.len());

    let mut color = session.color;
    for root in roots {
        let blade = session
            .generator(Variant::Curvy, root)
            .get_points(args.blade_radius, args.blade_length);
        color = color.nearby(40, 10, &mut palette);
        draw_blade(&mut session, &blade, color, floor, args.pensize);
    }

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}

fn draw_blade(session: &mut Session, blade: &[Point], color: Rgb, floor: u8, pen: f64) {
    let Some(first) = blade.first() else {
        return;
    };
    session.dot(*first, pen + 3.0, color);
    for (segment, shade) in blade.windows(2).zip(fade(color, floor, blade.len() - 1)) {
        session.draw(segment, &Stroke::new(shade, pen));
    }
}
