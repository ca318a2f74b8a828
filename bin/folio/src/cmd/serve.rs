//! Serve command - JSON API with cache invalidation on file changes

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::ContentKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::{net::TcpListener, sync::mpsc};

use crate::server::{AppState, ReloadMessage, create_router};

/// Quiet period before a burst of file events is applied.
const DEBOUNCE_MS: u64 = 200;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    open_browser: bool,
    watch: bool,
) -> Result<()> {
    tracing::info!(?config_path, ?port, watch, "Starting API server");

    let config = crate::load_config(config_path)?;
    let content_dir = config.content.dir.clone();
    let addr = format!(
        "{}:{}",
        config.server.host,
        port.unwrap_or(config.server.port)
    );

    let state = AppState::new(config);

    // Warm the cache and report what was found
    for kind in ContentKind::ALL {
        match state.store.entries(kind) {
            Ok(entries) => println!("  {kind}: {} entries", entries.len()),
            Err(e) => eprintln!("  ✗ Failed to load {kind}: {e}"),
        }
    }

    let _watcher = if watch && content_dir.is_dir() {
        Some(spawn_watcher(&content_dir, state.clone())?)
    } else {
        if watch {
            tracing::warn!(dir = %content_dir.display(), "content directory missing, not watching");
        }
        None
    };

    let app = create_router(state);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  API server running at http://{addr}/api");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser {
        let _ = open::that(format!("http://{addr}/api/projects"));
    }

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

/// Watch the content directory and invalidate the store on changes.
///
/// The returned watcher must be kept alive.
fn spawn_watcher(content_dir: &Path, state: AppState) -> Result<RecommendedWatcher> {
    let (tx, mut rx) = mpsc::channel::<Vec<PathBuf>>(64);

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| match res {
            Ok(event)
                if matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) =>
            {
                let _ = tx.blocking_send(event.paths);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "watch error"),
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    watcher
        .watch(content_dir, RecursiveMode::Recursive)
        .wrap_err("Failed to watch content directory")?;
    tracing::debug!(dir = %content_dir.display(), "Watching content directory");

    // Events carry absolute paths
    let root = content_dir
        .canonicalize()
        .unwrap_or_else(|_| content_dir.to_path_buf());
    tokio::spawn(async move {
        while let Some(mut paths) = rx.recv().await {
            // Collect the rest of the burst
            tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;
            while let Ok(more) = rx.try_recv() {
                paths.extend(more);
            }

            for message in reload_messages(&root, &paths) {
                tracing::info!(?message, "content changed");
                println!("  ↻ {}", describe(message));
                state.notify_reload(message);
            }
        }
    });

    Ok(watcher)
}

/// Map changed paths to the reloads they require.
fn reload_messages(root: &Path, paths: &[PathBuf]) -> Vec<ReloadMessage> {
    let mut kinds = BTreeSet::new();
    for path in paths {
        let kind = path
            .strip_prefix(root)
            .ok()
            .and_then(|rel| rel.components().next())
            .and_then(|c| c.as_os_str().to_str())
            .and_then(|name| name.parse::<ContentKind>().ok());
        match kind {
            Some(kind) => {
                kinds.insert(kind);
            }
            None => return vec![ReloadMessage::All],
        }
    }
    kinds.into_iter().map(ReloadMessage::Kind).collect()
}

fn describe(message: ReloadMessage) -> String {
    match message {
        ReloadMessage::Kind(kind) => format!("{kind} changed, cache cleared"),
        ReloadMessage::All => "content changed, cache cleared".to_string(),
    }
}
