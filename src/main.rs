use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use relm4::prelude::*;
use spinwheel::config;
use spinwheel::gui::app::AppModel;
use spinwheel::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "spinwheel", version, about, long_about = None)]
struct Cli {
    /// Seed the spin and confetti generator to replay the same session
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let rng = match cli.seed {
        Some(seed) => {
            log::info!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // gtk must not see our own flags
    let app = RelmApp::new("org.spinwheel.wheel").with_args(Vec::new());

    app.run::<AppModel>((config, rng, rx));
    Ok(())
}
