//! RenoHub Watch Demo — Shared-Project Notifier Walkthrough
//!
//! Wires the watcher to the in-memory project store and plays a scripted
//! session: bootstrap at login, a new share, a burst revoke, and a
//! self-initiated leave that stays silent.

use std::sync::Arc;
use std::time::Duration;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use renohub_core::config::AppConfig;
use renohub_core::error::AppError;
use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;
use renohub_watch::profiles::StaticDirectory;
use renohub_watch::source::MemoryProjectStore;
use renohub_watch::toast::TracingToastSink;
use renohub_watch::watcher::ShareWatcher;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("RENOHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Scripted watcher session against the in-memory store
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RenoHub watch demo v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Cast and pre-existing projects ───────────────────
    let maria = UserId::new();
    let jan = UserId::new();

    let directory = Arc::new(StaticDirectory::new());
    directory.insert(maria, "Maria");
    directory.insert(jan, "Jan");

    let store = Arc::new(MemoryProjectStore::new(config.watch.snapshot_buffer_size));
    store.upsert(Project::new(maria, "Loft conversion")).await;
    for name in ["Kitchen refit", "Garden office", "Attic insulation"] {
        store
            .upsert(Project::new(jan, name).with_member(maria))
            .await;
    }

    // ── Step 2: Maria logs in and starts watching ────────────────
    tracing::info!("Maria starts watching; bootstrap snapshots must stay silent");
    let watcher = ShareWatcher::new(
        config.watch.clone(),
        store.clone(),
        directory.clone(),
        Arc::new(TracingToastSink),
    );
    watcher.start(maria).await?;
    settle(&config).await;

    // ── Step 3: Jan shares one more project ──────────────────────
    tracing::info!("Jan shares a new project; expect one grant toast");
    store
        .upsert(Project::new(jan, "Bathroom retile").with_member(maria))
        .await;
    settle(&config).await;

    // ── Step 4: Jan revokes everything in a burst ────────────────
    tracing::info!("Jan revokes all shares; cumulative revoke toasts, one baseline commit");
    store.revoke_all(jan, maria).await;
    settle(&config).await;

    // ── Step 5: Jan shares everything again ──────────────────────
    tracing::info!("Jan re-shares his projects");
    store.grant_all(jan, maria).await;
    settle(&config).await;

    // ── Step 6: Maria leaves on her own; no toast ────────────────
    tracing::info!("Maria leaves Jan's projects herself; removals stay silent");
    watcher.mark_self_leave(jan);
    store.leave_all(maria, jan).await;
    settle(&config).await;

    // ── Step 7: Shut down ────────────────────────────────────────
    watcher.stop().await;

    let metrics = watcher.metrics().snapshot();
    tracing::info!(
        snapshots = metrics.snapshots_received,
        toasts = metrics.changes_presented,
        suppressed = metrics.removals_suppressed,
        baseline_commits = metrics.baseline_commits,
        "Demo finished"
    );
    Ok(())
}

/// Give the watcher time to diff, toast, and commit the baseline.
async fn settle(config: &AppConfig) {
    tokio::time::sleep(Duration::from_millis(config.watch.debounce_ms + 100)).await;
}
