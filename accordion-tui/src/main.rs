mod app;
mod content;
mod error;
mod paths;
mod render;
mod terminal;

use std::fs::{self, File};
use std::path::PathBuf;

use accordion::config::AccordionConfig;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::task::LocalSet;

use crate::error::TuiError;

/// Parameters shown when no file is given.
const SAMPLE: &str = r#"{
    "hTag": "h2",
    "expandCollapseOption": "expandedFirstOnly",
    "multipleAccordionsOpen": "openOne",
    "panels": [
        {
            "title": "What is an accordion?",
            "content": {
                "library": "H5P.AdvancedText 1.1",
                "params": { "text": "<p>A list of headers that reveal their content when activated.</p><p>Only one panel is open at a time in this sample.</p>" }
            }
        },
        {
            "title": "Keyboard",
            "content": {
                "library": "H5P.AdvancedText 1.1",
                "params": { "text": "<p>Up/Left and Down/Right move between headers.</p><p>Space or Enter opens and closes the focused panel.</p>" }
            }
        },
        {
            "title": "Resizing",
            "content": {
                "library": "H5P.AdvancedText 1.1",
                "params": { "text": "<p>While a panel slides, the host is told to resize every 40 ms.</p>" }
            }
        }
    ]
}"#;

fn init_logging() -> Result<(), TuiError> {
    let level = std::env::var("ACCORDION_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Debug);

    let path = paths::log_file()
        .filter(|path| path.parent().is_none_or(|dir| fs::create_dir_all(dir).is_ok()))
        .unwrap_or_else(|| PathBuf::from("accordion-tui.log"));
    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

fn load_config() -> Result<AccordionConfig, TuiError> {
    match std::env::args_os().nth(1) {
        Some(path) => {
            info!("Loading parameters from {}", PathBuf::from(&path).display());
            Ok(AccordionConfig::from_path(path)?)
        }
        None => Ok(AccordionConfig::from_json(SAMPLE)?),
    }
}

async fn try_main() -> Result<(), TuiError> {
    init_logging()?;
    let config = load_config()?;
    LocalSet::new().run_until(app::run(config)).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = try_main().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
