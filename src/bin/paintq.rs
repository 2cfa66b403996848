use std::{
    path::PathBuf,
    sync::{Arc, atomic::AtomicBool},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "paintq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the crawling-worms demo headless, optionally dumping frames as PNG.
    Worms(WormsArgs),
}

#[derive(Parser, Debug)]
struct WormsArgs {
    /// World config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many flushes.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Number of worm producer threads.
    #[arg(long)]
    worms: Option<usize>,

    /// Flush scheduling policy.
    #[arg(long, value_enum, default_value_t = PolicyChoice::Immediate)]
    policy: PolicyChoice,

    /// Bound the command channel (unbounded when omitted).
    #[arg(long)]
    capacity: Option<usize>,

    /// Paint straight into the screen instead of a back buffer.
    #[arg(long)]
    direct: bool,

    /// Write presented frames as PNG into this directory.
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Dump every n-th presented frame.
    #[arg(long, default_value_t = 1)]
    dump_every: u64,

    /// Fixed seed for reproducible worms.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging (`RUST_LOG` still applies).
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyChoice {
    Immediate,
    Batched,
}

impl From<PolicyChoice> for paintq::FlushPolicy {
    fn from(c: PolicyChoice) -> Self {
        match c {
            PolicyChoice::Immediate => Self::Immediate,
            PolicyChoice::Batched => Self::Batched,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Worms(args) => {
            init_logging(args.verbose);
            cmd_worms(args)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_world(args: &WormsArgs) -> anyhow::Result<paintq::worms::WorldConfig> {
    let mut world = match &args.config {
        Some(path) => paintq::worms::WorldConfig::from_json_path(path)
            .with_context(|| format!("load world config '{}'", path.display()))?,
        None => paintq::worms::WorldConfig::default(),
    };
    if let Some(n) = args.worms {
        world.worms = n;
    }
    if args.seed.is_some() {
        world.seed = args.seed;
    }
    world.validate()?;
    Ok(world)
}

fn cmd_worms(args: WormsArgs) -> anyhow::Result<()> {
    let world = Arc::new(load_world(&args)?);

    let buffering = if args.direct {
        paintq::Buffering::Direct
    } else {
        paintq::Buffering::Double
    };
    let mut driver = paintq::MemoryDriver::new(world.width, world.height, buffering);
    if let Some(dir) = &args.dump_dir {
        driver = driver.with_dump(paintq::FrameDump {
            dir: dir.clone(),
            every: args.dump_every,
        })?;
    }

    let opts = paintq::PainterOpts {
        policy: args.policy.into(),
        channel_capacity: args.capacity,
        ..paintq::PainterOpts::default()
    };
    let (painter, handle) = paintq::Painter::new(driver, opts)?;
    let painter = painter.spawn()?;

    let stop = Arc::new(AtomicBool::new(false));
    let worms = paintq::worms::spawn_worms(&handle, &world, &stop)?;

    let ticker = paintq::FlushTicker::spawn(
        handle.clone(),
        paintq::TickerOpts {
            after_flush: Some(paintq::worms::clear_command(&world)),
            max_ticks: Some(args.frames),
            ..paintq::TickerOpts::at_fps(world.fps)?
        },
    )?;
    let ticks = ticker.wait()?;

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    let mut trails = 0u64;
    for w in worms {
        trails += w
            .join()
            .map_err(|_| anyhow::anyhow!("worm thread panicked"))??;
    }
    drop(handle);

    let finished = painter
        .join()
        .map_err(|_| anyhow::anyhow!("painter thread panicked"))??;
    let stats = finished.stats;

    eprintln!(
        "ticks={ticks} trails={trails} frames={} painted={} tombstoned={} dumped={}",
        stats.frames_presented,
        stats.commands_painted,
        stats.commands_tombstoned,
        finished.driver.frames_dumped()
    );
    Ok(())
}
