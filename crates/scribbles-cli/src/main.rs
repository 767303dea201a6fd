//! scribbles - random line-art from polar walks
//!
//! Usage:
//!   scribbles points [-x X -y Y -r R -L LEN]   Print one scribble's points
//!   scribbles samples                         Grid of variants and rules
//!   scribbles spiral|tunnel|rain|shards|worm|grass  Compositions
//!   scribbles recipe <file.yaml>              Layered drawing from a recipe
//!   scribbles variants                        List scribble variants

use clap::{Parser, Subcommand};
use env_logger::Env;

use scribbles::Variant;

mod cli;

use cli::{grass, points, rain, recipe, samples, shards, spiral, tunnel, worm, GlobalArgs};

#[derive(Parser)]
#[command(name = "scribbles")]
#[command(about = "Random scribble drawings exported as SVG", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single scribble and print its points
    #[command(alias = "p")]
    Points(points::PointsArgs),

    /// Three variants under three rule sets, side by side
    Samples(samples::SamplesArgs),

    /// Rotated copies of a horizontally stretched scribble
    Spiral(spiral::SpiralArgs),

    /// Shrinking, rotating closed scribbles
    Tunnel(tunnel::TunnelArgs),

    /// Raindrops and their reflections
    Rain(rain::RainArgs),

    /// Recursive clumps of filled shards
    Shards(shards::ShardsArgs),

    /// A worm of growing dots
    Worm(worm::WormArgs),

    /// A ring of grass blades fading into the background
    Grass(grass::GrassArgs),

    /// Render a layered recipe file
    #[command(alias = "r")]
    Recipe(recipe::RecipeArgs),

    /// List available scribble variants
    Variants,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still overrides
    let level = match cli.global.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let global = &cli.global;
    match cli.command {
        Commands::Points(args) => points::execute(args, global),
        Commands::Samples(args) => samples::execute(args, global),
        Commands::Spiral(args) => spiral::execute(args, global),
        Commands::Tunnel(args) => tunnel::execute(args, global),
        Commands::Rain(args) => rain::execute(args, global),
        Commands::Shards(args) => shards::execute(args, global),
        Commands::Worm(args) => worm::execute(args, global),
        Commands::Grass(args) => grass::execute(args, global),
        Commands::Recipe(args) => recipe::execute(args, global),
        Commands::Variants => {
            cmd_variants();
            Ok(())
        }
    }
}

fn cmd_variants() {
    println!("Available variants:");
    for variant in Variant::all() {
        let about = match variant {
            Variant::Linear => "straight segments between stepped points",
            Variant::Bunched => "quadratic curves through every stepped point",
            Variant::Curvy => "quadratic curves trimmed to their first 5/6",
        };
        println!("  {:<8} {}", variant.name(), about);
    }
}
