mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{CliArgs, Command, SizeAction};
use dockpanel::config::PanelConfig;
use dockpanel::scenario::Scenario;
use dockpanel::storage::{DisabledStore, JsonFileStore, SizeStore};

fn main() -> Result<()> {
    dockpanel::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => PanelConfig::load_from(path),
        None => PanelConfig::load(),
    };
    let store = open_store(&args);

    match args.command {
        Command::Replay {
            scenario,
            edge,
            quiet,
        } => {
            let source = std::fs::read_to_string(&scenario)
                .with_context(|| format!("Failed to read scenario {}", scenario.display()))?;
            let parsed = Scenario::from_yaml(&source)
                .with_context(|| format!("Failed to parse scenario {}", scenario.display()))?;

            let mut config = config;
            if let Some(edge) = edge {
                config.edge = edge;
            }

            let total = parsed.steps.len();
            let location = parsed.replay(&config, store, |index, step, frame| {
                if quiet && index < total {
                    return;
                }
                match step {
                    Some(step) => println!("── step {}: {:?}", index, step),
                    None => println!("── mounted"),
                }
                print!("{}", frame);
            });
            println!("location: {}", location);
        }

        Command::Size { action } => match action.unwrap_or(SizeAction::Get) {
            SizeAction::Get => {
                println!("{}", store.read(&config.storage_key, config.default_size));
            }
            SizeAction::Set { value } => {
                store.write(&config.storage_key, value);
                println!("{}", store.read(&config.storage_key, config.default_size));
            }
            SizeAction::Reset => {
                store.reset(&config.storage_key);
                println!("{}", config.default_size);
            }
        },

        Command::Config { write } => {
            print!("{}", serde_yaml::to_string(&config).context("Failed to serialize config")?);
            if write {
                let saved = match &args.config {
                    Some(path) => config.save_to(path),
                    None => config.save(),
                };
                saved.map_err(anyhow::Error::msg)?;
            }
        }
    }

    Ok(())
}

fn open_store(args: &CliArgs) -> SizeStore {
    if args.ephemeral {
        return SizeStore::in_memory();
    }
    match args
        .storage
        .clone()
        .or_else(dockpanel::config_paths::storage_file)
    {
        Some(path) => SizeStore::new(JsonFileStore::open(path)),
        None => {
            tracing::warn!("No config directory available, sizes will not persist");
            SizeStore::new(DisabledStore)
        }
    }
}
