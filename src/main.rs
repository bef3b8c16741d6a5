#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::broadcast::Receiver;

use update_notifier::dialogs::{AboutState, DialogView};
use update_notifier::state::{AppEvent, ConfigManager, StatusLevel, StatusMessage};
use update_notifier::updater::{
    DefaultUpdateService, NotificationState, UpdateChecker, UpdateController,
    UpdatePreferenceStore, UserChoice,
};

const APP_NAME: &str = "Update Notifier";

#[derive(Debug, Parser)]
#[command(version, about = "Check for a newer release and prompt about it")]
struct Cli {
    /// Query the release feed even if the last check was recent
    #[arg(long)]
    force: bool,

    /// Directory holding settings.json and update.json
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Version to compare against instead of this build's
    #[arg(long, value_name = "VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    current_version: String,

    /// Print the about dialog and exit
    #[arg(long)]
    about: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.about {
        let about =
            AboutState::new(APP_NAME, &cli.current_version).with_build(env!("UPDATE_NOTIFIER_GIT_SHA"));
        print_view(&about.render());
        return Ok(());
    }

    let config = match &cli.config_dir {
        Some(dir) => ConfigManager::with_config_dir(dir)?,
        None => ConfigManager::new()?,
    };
    let mut settings = config.load_settings().unwrap_or_else(|e| {
        log::warn!("Failed to load settings, using defaults: {e:#}");
        Default::default()
    });

    // Override with UPDATE_NOTIFIER_INTERVAL_SECS=30 for testing
    if let Some(secs) =
        std::env::var("UPDATE_NOTIFIER_INTERVAL_SECS").ok().and_then(|v| v.parse::<u64>().ok())
    {
        settings.updates.check_interval_secs = secs;
    }

    if !cli.force && !settings.updates.auto_check {
        log::info!("Automatic update checks are disabled");
        return Ok(());
    }

    let checker = UpdateChecker::from_settings(&settings.updates, &cli.current_version)
        .context("Failed to set up update checker")?;
    let preferences = UpdatePreferenceStore::open(config);
    let controller =
        UpdateController::with_system_browser(DefaultUpdateService::new(checker, preferences));
    let mut events = controller.subscribe();

    let state = controller.check_now(cli.force).await;
    print_status(&mut events);

    if let NotificationState::UpdateAvailable(_) = state {
        prompt(&controller, &mut events).await?;
    }
    controller.close();

    Ok(())
}

async fn prompt<S, L>(
    controller: &UpdateController<S, L>,
    events: &mut Receiver<AppEvent>,
) -> anyhow::Result<()>
where
    S: update_notifier::updater::UpdateService,
    L: update_notifier::updater::BrowserLauncher,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(dialog) = controller.update_dialog() {
        print_view(&dialog.render());
        println!("[u] update now  [l] later  [s] skip this version  [n] toggle don't show again");

        let Some(line) = lines.next_line().await? else {
            // stdin closed: treat like closing the dialog
            return Ok(());
        };
        let choice = match line.trim() {
            "u" => UserChoice::Download,
            "l" => UserChoice::Later,
            "s" => UserChoice::IgnoreVersion,
            "n" => {
                controller.set_never_show(!dialog.never_show);
                continue;
            }
            other => {
                println!("Unknown choice: {other}");
                continue;
            }
        };

        if let Err(e) = controller.choose(choice) {
            log::warn!("{e}");
        }
        print_status(events);
    }

    Ok(())
}

fn print_status(events: &mut Receiver<AppEvent>) {
    while let Ok(event) = events.try_recv() {
        if let Some(message) = StatusMessage::from_event(&event) {
            match message.level {
                StatusLevel::Info => println!("{}", message.text),
                StatusLevel::Error => eprintln!("{}", message.text),
            }
        }
    }
}

fn print_view(view: &DialogView) {
    println!("== {} ==", view.title);
    for line in &view.lines {
        println!("{line}");
    }
    if let Some(checkbox) = &view.checkbox {
        let mark = if checkbox.checked { "x" } else { " " };
        println!("[{mark}] {}", checkbox.label);
    }
    if let Some(error) = &view.error {
        println!("! {error}");
    }
    let buttons: Vec<String> = view
        .buttons
        .iter()
        .map(|b| if b.enabled { format!("<{}>", b.label) } else { format!("({})", b.label) })
        .collect();
    println!("{}", buttons.join(" "));
}
