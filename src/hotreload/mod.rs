//! Hot reload of the awakening config.
//!
//! Watches `config/awakening.json` through `notify` and swaps the config
//! resource (and the manager's copy) when the file changes. A file that
//! fails to read or parse keeps the previous config and logs the error, so
//! a bad edit on a live server never wipes the tuning.

use bevy::prelude::*;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::config::AwakenConfig;
use crate::constants::CONFIG_PATH;
use crate::manager::AwakenManager;

pub struct HotReloadPlugin;

impl Plugin for HotReloadPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HotReloadState::default())
            .add_event::<ConfigReloadEvent>()
            .add_systems(Startup, setup_config_watcher)
            .add_systems(Update, process_config_changes);
    }
}

/// Hot-reload state tracking
#[derive(Resource, Default)]
pub struct HotReloadState {
    pub enabled: bool,
    pub watched_file: Option<PathBuf>,
    pub reload_count: u32,
    pub last_reload_success: bool,
    pub last_reload_time: f64,
    pub last_error: Option<String>,
}

/// Fired after every reload attempt, successful or not
#[derive(Event, Debug, Clone)]
pub struct ConfigReloadEvent {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Watcher handle shared across Bevy systems
#[derive(Resource)]
struct WatcherResource {
    _watcher: RecommendedWatcher,
    receiver: Arc<Mutex<Receiver<notify::Result<Event>>>>,
}

fn setup_config_watcher(mut commands: Commands, mut state: ResMut<HotReloadState>) {
    let config_path = PathBuf::from(CONFIG_PATH);

    if !config_path.exists() {
        warn!("Config file not found: {:?}", config_path);
        state.enabled = false;
        return;
    }
    let Some(config_dir) = config_path.parent() else {
        state.enabled = false;
        return;
    };

    let (tx, rx): (
        Sender<notify::Result<Event>>,
        Receiver<notify::Result<Event>>,
    ) = channel();

    let mut watcher = match notify::recommended_watcher(tx) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create file watcher: {}", e);
            state.enabled = false;
            return;
        }
    };

    if let Err(e) = watcher.watch(config_dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch config directory: {}", e);
        state.enabled = false;
        return;
    }

    state.enabled = true;
    state.watched_file = Some(config_path.clone());

    commands.insert_resource(WatcherResource {
        _watcher: watcher,
        receiver: Arc::new(Mutex::new(rx)),
    });

    info!("Hot-reload enabled for {:?}", config_path);
}

/// Drain filesystem events and apply config changes
fn process_config_changes(
    watcher: Option<Res<WatcherResource>>,
    mut state: ResMut<HotReloadState>,
    mut config: ResMut<AwakenConfig>,
    mut manager: ResMut<AwakenManager>,
    mut events: EventWriter<ConfigReloadEvent>,
    time: Res<Time>,
) {
    let Some(watcher) = watcher else {
        return;
    };
    let Ok(receiver) = watcher.receiver.lock() else {
        return;
    };

    while let Ok(result) = receiver.try_recv() {
        match result {
            Ok(event) => {
                if is_config_modify_event(&event, &state.watched_file) {
                    info!("Awakening config modified, reloading...");
                    let path = state
                        .watched_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));

                    match reload_awaken_config() {
                        Ok(new_config) => {
                            *config = new_config.clone();
                            manager.set_config(new_config);

                            state.reload_count += 1;
                            state.last_reload_success = true;
                            state.last_reload_time = time.elapsed_secs_f64();
                            state.last_error = None;

                            events.send(ConfigReloadEvent {
                                path,
                                success: true,
                                error: None,
                            });

                            info!(
                                "Awakening config reloaded (count: {})",
                                state.reload_count
                            );
                        }
                        Err(e) => {
                            state.last_reload_success = false;
                            state.last_error = Some(e.clone());

                            events.send(ConfigReloadEvent {
                                path,
                                success: false,
                                error: Some(e.clone()),
                            });

                            error!("Config reload failed, keeping previous config: {}", e);
                        }
                    }
                }
            }
            Err(e) => {
                warn!("File watcher error: {}", e);
            }
        }
    }
}

/// Check if event touches the watched config file
fn is_config_modify_event(event: &Event, watched_file: &Option<PathBuf>) -> bool {
    if watched_file.is_some() {
        event.paths.iter().any(|p| {
            p.ends_with("awakening.json")
                && (event.kind.is_modify() || matches!(event.kind, notify::EventKind::Create(_)))
        })
    } else {
        false
    }
}

/// Read, parse and sanitize the config from disk
fn reload_awaken_config() -> Result<AwakenConfig, String> {
    let mut config = AwakenConfig::load_from_path(CONFIG_PATH).map_err(|e| e.to_string())?;
    let corrected = config.sanitize();
    if corrected > 0 {
        warn!(corrected, "reloaded config had out-of-band values, clamped");
    }
    Ok(config)
}

/// Diagnostics snapshot of the reload state
#[derive(Debug, Serialize, Deserialize)]
pub struct HotReloadStatus {
    pub enabled: bool,
    pub watched_file: Option<String>,
    pub reload_count: u32,
    pub last_reload_success: bool,
    pub last_error: Option<String>,
}

impl HotReloadStatus {
    pub fn from_state(state: &HotReloadState) -> Self {
        Self {
            enabled: state.enabled,
            watched_file: state.watched_file.as_ref().map(|p| p.display().to_string()),
            reload_count: state.reload_count,
            last_reload_success: state.last_reload_success,
            last_error: state.last_error.clone(),
        }
    }
}
