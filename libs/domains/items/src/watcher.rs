//! Invalidates the stats cache when the data file changes on disk.
//!
//! Edits made outside the API (a text editor, a deploy script) are picked up
//! the same way as writes from `POST /items`.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::repository::ItemRepository;
use crate::stats::StatsService;

/// Keeps the filesystem subscription alive. Dropping it stops watching.
pub struct DataFileWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl Drop for DataFileWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Modification time and size; either changing counts as a new version.
type Fingerprint = Option<(Option<SystemTime>, u64)>;

fn version(meta: &Metadata) -> (Option<SystemTime>, u64) {
    (meta.modified().ok(), meta.len())
}

async fn fingerprint(path: &Path) -> Fingerprint {
    tokio::fs::metadata(path).await.ok().map(|meta| version(&meta))
}

/// Starts watching `path` and invalidates `stats` whenever it changes.
///
/// The parent directory is watched rather than the file itself so that
/// editors which replace the file by rename are still observed.
///
/// Must be called from within a tokio runtime.
pub fn watch_data_file<R>(
    path: impl Into<PathBuf>,
    stats: StatsService<R>,
) -> notify::Result<DataFileWatcher>
where
    R: ItemRepository + 'static,
{
    let path = path.into();
    let file_name = path
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| notify::Error::generic("data path has no file name"))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(e) => warn!(error = %e, "data file watcher error"),
        },
        Config::default(),
    )?;
    watcher.watch(&directory, RecursiveMode::NonRecursive)?;

    // Taken before returning so that a write right after startup is seen
    let mut last_seen = std::fs::metadata(&path).ok().map(|meta| version(&meta));
    let task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if matches!(event.kind, EventKind::Access(_)) {
                continue;
            }
            let touches_file = event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()));
            if !touches_file {
                continue;
            }

            let current = fingerprint(&path).await;
            if current == last_seen {
                debug!(kind = ?event.kind, "items file event without content change");
                continue;
            }
            last_seen = current;

            info!(path = %path.display(), "items file changed, invalidating stats cache");
            stats.invalidate().await;
        }
    });

    info!(directory = %directory.display(), "watching items data file");
    Ok(DataFileWatcher {
        _watcher: watcher,
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fingerprint_tracks_size_and_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        assert_eq!(fingerprint(&path).await, None);

        tokio::fs::write(&path, "[]").await.unwrap();
        let first = fingerprint(&path).await;
        assert_eq!(first.map(|(_, len)| len), Some(2));

        tokio::fs::write(&path, "[ ]").await.unwrap();
        let second = fingerprint(&path).await;
        assert_ne!(first, second);
        assert_eq!(second.map(|(_, len)| len), Some(3));
    }
}
