use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    error::{QuizError, Result},
    models::{Question, WrongEntry},
};

/// What a batched [`WrongBookStore::apply`] changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookChange {
    pub removed: usize,
    pub added: usize,
}

/// The durable wrong-answer book.
///
/// Every mutation rewrites the whole file. Load, mutate and save run under one
/// process-wide lock so concurrent gradings do not lose each other's updates.
#[derive(Clone)]
pub struct WrongBookStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl WrongBookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries; empty when the book has never been written.
    pub async fn load_all(&self) -> Result<Vec<WrongEntry>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Appends `question` unless an entry with the same identity exists.
    pub async fn add_if_absent(&self, question: Question) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        if !insert_if_absent(&mut entries, question) {
            return Ok(false);
        }
        self.write(&entries).await?;
        Ok(true)
    }

    /// Removes every entry carrying `id`, across chapters.
    pub async fn remove_by_id(&self, id: i64) -> Result<usize> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        let removed = retain_without(&mut entries, &[id]);
        self.write(&entries).await?;
        tracing::debug!("removed {removed} wrong-book entries with id {id}");
        Ok(removed)
    }

    /// One locked cycle: drop every entry whose id is in `removals`, then add
    /// each of `additions` that is not already present.
    pub async fn apply(&self, removals: &[i64], additions: Vec<Question>) -> Result<BookChange> {
        if removals.is_empty() && additions.is_empty() {
            return Ok(BookChange::default());
        }

        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        let removed = retain_without(&mut entries, removals);
        let mut added = 0;
        for question in additions {
            if insert_if_absent(&mut entries, question) {
                added += 1;
            }
        }

        if removed > 0 || added > 0 {
            self.write(&entries).await?;
        }
        tracing::debug!("wrong book updated: removed={removed}, added={added}");
        Ok(BookChange { removed, added })
    }

    async fn read(&self) -> Result<Vec<WrongEntry>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(QuizError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| QuizError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, entries: &[WrongEntry]) -> Result<()> {
        let bytes = to_pretty_json(entries).map_err(|source| QuizError::Json {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|source| QuizError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

fn insert_if_absent(entries: &mut Vec<WrongEntry>, question: Question) -> bool {
    if entries.iter().any(|e| e.same_identity(&question)) {
        return false;
    }
    entries.push(question);
    true
}

fn retain_without(entries: &mut Vec<WrongEntry>, ids: &[i64]) -> usize {
    let before = entries.len();
    entries.retain(|e| !ids.contains(&e.id));
    before - entries.len()
}

/// Four-space indented JSON with non-ASCII text written as-is.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
