//! `tunnel` - a wireframe tunnel, darker toward the viewer.
//!
//! Draw a wide curvy scribble, then redraw it repeatedly: each copy is
//! rotated another 15°, nudged left, scaled up, drawn with a thicker pen
//! and a darker color.

use anyhow::Result;
use clap::Args;
use rand::Rng as _;

use scribbles::{Point, PointTransformer, RenderSink, Rgb, RuleSpec, Stroke, Variant};

use super::common::{Defaults, GlobalArgs};

const DEFAULTS: Defaults = Defaults {
    width: 1000.0,
    height: 800.0,
    scale: 1.0,
    color: Rgb::new(255, 100, 0),
    background: Rgb::BLACK,
};

const STEP_DEGREES: f64 = 15.0;

#[derive(Args, Debug)]
pub struct TunnelArgs {
    /// Starting radius
    #[arg(short = 'r', long, default_value_t = 30.0)]
    pub radius: f64,

    /// Maximum length of the scribble
    #[arg(short = 'L', long, default_value_t = 500.0)]
    pub length: f64,

    /// Pen growth divisor (larger = thinner walls)
    #[arg(short = 'p', long, default_value_t = 1.0)]
    pub pensize: f64,
}

pub fn execute(args: TunnelArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("tunnel", DEFAULTS)?;
    let mut palette = session.palette_rng();

    let angle_rule = RuleSpec::jitter(1, 30).compile(palette.next_u64())?;
    let points = session
        .generator(Variant::Curvy, Point::ORIGIN)
        .with_angle_rule(angle_rule)
        .get_points(args.radius, args.length);

    let mut color = session.color;
    let mut pen = 1.0;
    let mut zoom = 1.0;
    let to_canvas = session.to_canvas();
    session
        .canvas
        .draw_closed_path(&to_canvas.transform(&points), &Stroke::new(color, pen));

    let iterations = (360.0 / STEP_DEGREES) as usize;
    let pen_factor = if args.pensize > 0.0 { args.pensize } else { 1.0 };
    for i in 1..iterations {
        let ring = PointTransformer::new()
            .translate(-(i as f64 + 1.0), 0.0)
            .rotate(-(i as f64) * STEP_DEGREES)
            .scale(zoom, zoom)
            .transform(&points);
        color = color.offset_clamped(-30, 10, 50, 255, &mut palette);
        session
            .canvas
            .draw_closed_path(&to_canvas.transform(&ring), &Stroke::new(color, pen));

        zoom += i as f64 / session.rng.random_range(5..=10) as f64;
        pen += i as f64 / iterations as f64 / pen_factor;
    }
    log::info!("Drew {} rings, final zoom {:.1}", iterations, zoom);

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}
