use std::io::Write as _;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stagelint", version)]
#[command(about = "Validate scene-graph animation layouts (out-of-frame and overlap checks)")]
struct Cli {
    /// Validate only the named scene.
    #[arg(long)]
    scene: Option<String>,

    /// Minimum overlap ratio to report (ratios above 0.60 are always errors).
    #[arg(long, default_value_t = 0.30)]
    overlap_threshold: f64,

    /// Scene collection to validate.
    #[arg(long, default_value = "tutorial")]
    scenes: String,

    /// Emit lifecycle diagnostics and a final-frame element dump.
    #[arg(long, short)]
    verbose: bool,

    /// Print the issue list as JSON instead of the human report.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = stagelint::scenes::collection(&cli.scenes)
        .with_context(|| format!("unknown scene collection '{}'", cli.scenes))?;

    let frame = stagelint::Frame::default();
    eprintln!(
        "validating {} scene(s), frame {:.2} x {:.2} (half: {:.2} x {:.2}), overlap threshold {:.0}%",
        registry.len(),
        frame.half_width * 2.0,
        frame.half_height * 2.0,
        frame.half_width,
        frame.half_height,
        cli.overlap_threshold * 100.0
    );

    let config = stagelint::DriverConfig {
        scene: cli.scene,
        scan: stagelint::ScanConfig {
            overlap_threshold: cli.overlap_threshold,
            ..stagelint::ScanConfig::default()
        },
        frame,
    };
    let tracker = stagelint::Driver::new(config).run(&registry)?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, tracker.issues())
            .context("serialize issues to JSON")?;
        writeln!(&mut stdout)?;
    } else {
        tracker.write_report(&mut stdout)?;
    }

    if !tracker.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
