//! Host-side helper. `simulate` runs the background scene headlessly and
//! reports what it drew; `serve` builds the WASM bundle and serves `static/`
//! locally.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;
    use std::process::{Command, Stdio};
    use std::{fs, thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use clap::{Parser, Subcommand};
    use portfolio_fx::surface::RecordingSurface;
    use portfolio_fx::{FrameStats, HeroField, Scene, SceneConfig, Viewport};

    #[derive(Parser)]
    #[command(name = "portfolio_fx")]
    #[command(about = "Headless preview and local serving for the portfolio background", long_about = None)]
    #[command(version)]
    struct Cli {
        #[command(subcommand)]
        command: Commands,

        /// Verbosity level (can be repeated for more detail)
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Run the scene without a browser and log draw statistics
        Simulate {
            #[arg(long, default_value_t = 600)]
            frames: u64,
            #[arg(long, default_value_t = 1920.0)]
            width: f64,
            #[arg(long, default_value_t = 1080.0)]
            height: f64,
            #[arg(long, default_value_t = 1)]
            seed: u64,
            /// JSON file overriding scene defaults
            #[arg(long)]
            config: Option<PathBuf>,
        },
        /// Build the WASM bundle with wasm-pack and serve static/ on a local port
        Serve {
            #[arg(long, default_value_t = 8000)]
            port: u16,
            /// Serve whatever is already in static/pkg
            #[arg(long)]
            skip_build: bool,
        },
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let mut logger =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
        if cli.verbose > 0 {
            logger.filter_level(match cli.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            });
        }
        logger.init();

        match cli.command {
            Commands::Simulate {
                frames,
                width,
                height,
                seed,
                config,
            } => simulate(frames, Viewport::new(width, height), seed, config),
            Commands::Serve { port, skip_build } => serve(port, skip_build),
        }
    }

    fn simulate(frames: u64, viewport: Viewport, seed: u64, config: Option<PathBuf>) -> Result<()> {
        let config = match config {
            Some(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                SceneConfig::from_json(&text)?
            }
            None => SceneConfig::default(),
        };

        let mut hero = HeroField::new(config.hero.clone(), viewport, seed.wrapping_add(1))?;
        let mut scene = Scene::new(config, viewport, seed)?;
        let mut surface = RecordingSurface::new(viewport.width, viewport.height);
        let mut total = FrameStats::default();
        let mut calls = 0usize;
        let mut hero_drawn = 0usize;
        for _ in 0..frames {
            hero_drawn += hero.frame(&mut surface);
            let stats = scene.frame(&mut surface, 1.0 / 60.0);
            calls += surface.take_calls().len();
            total.particles_drawn += stats.particles_drawn;
            total.particles_culled += stats.particles_culled;
            total.geometry_drawn += stats.geometry_drawn;
            total.geometry_culled += stats.geometry_culled;
            total.waves_drawn += stats.waves_drawn;
        }

        let ticks = scene.stats();
        println!(
            "{} frames, {} draw calls; particles {} drawn / {} culled, solids {} drawn / {} culled, {} wave fills",
            ticks.ticks,
            calls,
            total.particles_drawn,
            total.particles_culled,
            total.geometry_drawn,
            total.geometry_culled,
            total.waves_drawn,
        );
        println!("{} particle respawns, {} wave resets", ticks.respawns, ticks.wave_resets);
        println!("hero layer: {hero_drawn} particle draws");
        Ok(())
    }

    fn serve(port: u16, skip_build: bool) -> Result<()> {
        if !skip_build {
            log::info!("building WASM pkg");
            let status = Command::new("wasm-pack")
                .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
                .status()
                .context("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")?;
            if !status.success() {
                bail!("wasm-pack finished with errors");
            }
        }

        println!("Serving static/ at http://127.0.0.1:{port} …");
        let mut server = Command::new("python3")
            .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server")?;

        // Keep process alive while the server runs
        loop {
            if let Some(status) = server.try_wait()? {
                bail!("http server exited: {status}");
            }
            thread::sleep(Duration::from_secs(1));
        }
    }
}
