//! # scribbles
//!
//! Random polar line-art. A [`ScribbleGenerator`] walks around an origin,
//! nudging its angle and radius through two [`UpdateRule`]s, and returns the
//! visited points (optionally smoothed into quadratic Bézier curves). A
//! [`PointTransformer`] then moves the points into place and a
//! [`RenderSink`] draws them.
//!
//! ```
//! use scribbles::{Point, PointTransformer, Rgb, RenderSink, ScribbleGenerator, Stroke, SvgCanvas, Variant};
//!
//! let points = ScribbleGenerator::seeded(Variant::Curvy, Point::ORIGIN, 7).get_points(5.0, 250.0);
//! let placed = PointTransformer::new().scale(4.0, 4.0).translate(-100.0, 0.0).transform(&points);
//!
//! let mut canvas = SvgCanvas::new(800.0, 600.0, Rgb::WHITE)?;
//! canvas.draw_path(&placed, &Stroke::new(Rgb::BLACK, 2.0));
//! assert!(canvas.to_svg().contains("<polyline"));
//! # Ok::<(), scribbles::ScribbleError>(())
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod color;
pub mod error;
pub mod geometry;
pub mod polar;
pub mod render;
pub mod rng;
pub mod rules;
pub mod scribble;
pub mod transform;

// Re-export common types at crate root for convenience.
pub use color::Rgb;
pub use error::ScribbleError;
pub use geometry::{bounding_box, max_distance, path_length, BoundingBox, Point};
pub use polar::{PolarState, PolarStepper};
pub use render::{PenCursor, RenderSink, Stroke, SvgCanvas};
pub use rng::Rng;
pub use rules::{CompiledRule, RuleRun, RuleSpec, SharedRule, UpdateRule};
pub use scribble::{bezier_points, LengthBudget, ScribbleConfig, ScribbleGenerator, Trace, Variant};
pub use transform::{PointTransformer, TransformOp};
