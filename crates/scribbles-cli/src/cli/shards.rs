//! `shards` - a clump of colored glass shards.
//!
//! Fill in a scribble, pick `n` of its points as origins for new scribbles,
//! and recurse with `n - 1` until `n` reaches zero.

use anyhow::Result;
use clap::Args;
use rand::Rng as _;

use scribbles::{Point, PointTransformer, RenderSink, Rgb, RuleSpec, Stroke, Variant};

use super::common::{Defaults, GlobalArgs, Session};

const DEFAULTS: Defaults = Defaults {
    width: 1000.0,
    height: 800.0,
    scale: 10.0,
    color: Rgb::new(255, 0, 0),
    background: Rgb::new(0, 255, 255),
};

#[derive(Args, Debug)]
pub struct ShardsArgs {
    /// Starting radius of each shard
    #[arg(short = 'r', long, default_value_t = 20.0)]
    pub radius: f64,

    /// Maximum length of each shard
    #[arg(short = 'L', long, default_value_t = 200.0)]
    pub length: f64,

    /// Maximum recursion depth
    #[arg(short = 'd', long, default_value_t = 6)]
    pub depth: usize,
}

struct Shards<'a> {
    session: &'a mut Session,
    palette: scribbles::Rng,
    radius: f64,
    length: f64,
    drawn: usize,
}

impl Shards<'_> {
    fn branch(&mut self, origin: Point, color: Rgb, children: usize) -> Result<()> {
        // Randomly alternate between linear and bunched shards.
        let variant = if self.session.rng.random_bool(0.5) { Variant::Bunched } else { Variant::Linear };
        let rule = RuleSpec::jitter(1, 286).compile(self.palette.next_u64())?;
        let points = self
            .session
            .generator(variant, origin)
            .with_angle_rule(rule)
            .get_points(self.radius, self.length);

        // Slide the shard so its first point sits on the origin.
        let shift = points[0].distance(origin);
        let shard = PointTransformer::new().translate(-shift, 0.0).transform(&points);

        let pen = children.max(3) as f64;
        let scaled = self.session.to_canvas().transform(&shard);
        self.session
            .canvas
            .fill_path(&scaled, color, &Stroke::new(color.darken(30, 100), pen));
        self.drawn += 1;

        for _ in 0..children {
            let index = if shard.len() >= 2 { self.session.rng.random_range(1..shard.len()) } else { 0 };
            let next_color = color.offset_clamped(-50, 50, 20, 255, &mut self.palette);
            self.branch(shard[index], next_color, children - 1)?;
        }
        Ok(())
    }
}

pub fn execute(args: ShardsArgs, global: &GlobalArgs) -> Result<()> {
    let mut session = global.session("shards", DEFAULTS)?;
    let palette = session.palette_rng();
    let color = session.color;
    let origin = Point::new(5.0 * args.depth as f64, -2.0 * args.depth as f64);

    let mut shards = Shards {
        session: &mut session,
        palette,
        radius: args.radius,
        length: args.length,
        drawn: 0,
    };
    shards.branch(origin, color, args.depth)?;
    log::info!("Drew {} shards", shards.drawn);

    if let Some(path) = session.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}
