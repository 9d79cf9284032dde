use crate::events::AppEvent;
use anyhow::Context;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use polyslider::config::get_config_path;
use std::path::Path;

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {:#}", e);
    }
}

async fn watch_config(tx: Sender<AppEvent>) -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .context("config path has no parent directory")?;
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if bridge_tx.send_blocking(res).is_err() {
                log::debug!("Config watcher channel closed");
            }
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                tx.send(AppEvent::ConfigReload).await?;
            }
            Ok(_) => {}
            Err(e) => log::warn!("Watch error: {}", e),
        }
    }
    Ok(())
}

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}
