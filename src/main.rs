use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use orbfetch::app::App;
use orbfetch::config::{self, Config, load_config, load_config_from_path};
use orbfetch::event::{Event, EventHandler};
use orbfetch::system::collector::Collector;
use orbfetch::system::snapshot::DisplayFlags;
use orbfetch::{logging, report, ui};

/// Gap between the two passes of a one-shot run, so CPU usage has a delta.
const ONE_SHOT_SAMPLE_GAP: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(
    name = "orbfetch",
    about = "Animated system summary with live-refreshing stats"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation frames per second
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=1000))]
    fps: Option<u64>,

    /// Hide the per-disk usage rows
    #[arg(short = 'n', long, default_value_t = false)]
    no_disk_usage: bool,

    /// Hide GPU rows
    #[arg(long, default_value_t = false)]
    no_gpu: bool,

    /// Print the summary once as plain text and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Print the snapshot once as JSON and exit
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write JSON-lines debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_tracing_json(path)?;
    }
    let config = load_config_for_cli(&cli);
    tracing::debug!(?config, "configuration loaded");

    if cli.once || cli.json {
        return print_once(config, cli.json).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    let app = result?;
    print!("{}", report::plain_text(&app.snapshot));
    Ok(())
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<App> {
    let frame_interval = config.general.frame_interval();
    let mut app = App::new(config);
    let mut events = EventHandler::new(frame_interval);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Frame => app.on_frame(),
            Event::Resize => terminal.clear()?,
        }
        if app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(app)
}

async fn print_once(config: Config, json: bool) -> Result<()> {
    let flags = DisplayFlags {
        show_disk_usage: config.general.show_disk_usage,
        show_gpus: config.general.show_gpus,
    };
    let mut collector = Collector::new(config.sources);
    let mut snapshot = collector.snapshot(flags);
    tokio::time::sleep(ONE_SHOT_SAMPLE_GAP).await;
    collector.dynamic_pass(&mut snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", report::plain_text(&snapshot));
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(fps) = cli.fps {
        config.general.fps = fps;
    }
    if cli.no_disk_usage {
        config.general.show_disk_usage = false;
    }
    if cli.no_gpu {
        config.general.show_gpus = false;
    }

    config
}
