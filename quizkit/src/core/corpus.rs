use crate::config::{CHUNKS_FILE_NAME, INDEX_FILE_NAME};
use crate::core::index::FlatIndex;
use crate::core::model::{Chunk, RelevantChunk};
use crate::core::store::ChunkStore;
use crate::error::QuizkitError;
use crate::{err, map_err};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Locations of the two corpus artifacts.
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    pub index: PathBuf,
    pub store: PathBuf,
}

impl CorpusPaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            index: data_dir.join(INDEX_FILE_NAME),
            store: data_dir.join(CHUNKS_FILE_NAME),
        }
    }
}

/// The single live pairing of vector index and chunk store.
///
/// The n-th vector in the index corresponds to the n-th chunk in the
/// store. Both members are only ever appended to through [Corpus::append],
/// which keeps them in lockstep, so positional drift cannot occur.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    index: FlatIndex,
    store: ChunkStore,
}

impl Corpus {
    pub fn new(dim: usize) -> Self {
        Self {
            index: FlatIndex::new(dim),
            store: ChunkStore::default(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Append a chunk and its vector as one unit.
    pub fn append(&mut self, chunk: Chunk, vector: Vec<f32>) -> Result<(), QuizkitError> {
        // The vector goes in first; if its dimension is rejected the
        // store is left untouched and the pairing stays intact.
        self.index.append(vector)?;
        self.store.push(chunk);
        Ok(())
    }

    /// Top-k search resolved to chunks, preserving the index ranking.
    /// Positions outside the store are skipped; they cannot occur while
    /// the corpus invariant holds.
    pub fn search(&self, query: &[f32], limit: usize) -> Vec<RelevantChunk> {
        self.index
            .search(query, limit)
            .into_iter()
            .filter_map(|(position, score)| {
                let Some(chunk) = self.store.get(position) else {
                    warn!(
                        "Search returned position {position} outside the store (len {})",
                        self.store.len()
                    );
                    return None;
                };
                Some(RelevantChunk {
                    id: chunk.id,
                    text: chunk.text.clone(),
                    score,
                })
            })
            .collect()
    }

    /// Load the corpus from disk.
    ///
    /// Returns `None` when no corpus exists. A single missing artifact,
    /// an unreadable artifact, or members of different lengths mean the
    /// corpus is corrupt; an explicit [reset][Corpus::reset] is required
    /// before ingesting again.
    pub async fn load(paths: &CorpusPaths) -> Result<Option<Self>, QuizkitError> {
        let index_exists = map_err!(tokio::fs::try_exists(&paths.index).await);
        let store_exists = map_err!(tokio::fs::try_exists(&paths.store).await);

        match (index_exists, store_exists) {
            (false, false) => Ok(None),
            (true, true) => {
                let bytes = map_err!(tokio::fs::read(&paths.index).await);
                let index = match FlatIndex::from_bytes(&bytes) {
                    Ok(index) => index,
                    Err(e) => {
                        return err!(
                            CorruptCorpus,
                            "unreadable index artifact ({e}); reset the corpus and re-ingest"
                        )
                    }
                };
                let bytes = map_err!(tokio::fs::read(&paths.store).await);
                let store = match ChunkStore::from_bytes(&bytes) {
                    Ok(store) => store,
                    Err(e) => {
                        return err!(
                            CorruptCorpus,
                            "unreadable chunk store ({e}); reset the corpus and re-ingest"
                        )
                    }
                };

                if index.len() != store.len() {
                    return err!(
                        CorruptCorpus,
                        "index holds {} vectors but the store holds {} chunks; reset the corpus and re-ingest",
                        index.len(),
                        store.len()
                    );
                }

                Ok(Some(Self { index, store }))
            }
            (index_exists, _) => {
                let (present, missing) = if index_exists {
                    (INDEX_FILE_NAME, CHUNKS_FILE_NAME)
                } else {
                    (CHUNKS_FILE_NAME, INDEX_FILE_NAME)
                };
                err!(
                    CorruptCorpus,
                    "'{present}' exists without '{missing}'; reset the corpus and re-ingest"
                )
            }
        }
    }

    /// Write both artifacts to disk.
    ///
    /// Each artifact is staged to a temp file and committed with an
    /// atomic rename, index first. A crash mid-persist leaves either the
    /// previous consistent pair or a fully written new artifact, never a
    /// half-written file.
    pub async fn persist(&self, paths: &CorpusPaths) -> Result<(), QuizkitError> {
        if let Some(parent) = paths.index.parent() {
            map_err!(tokio::fs::create_dir_all(parent).await);
        }

        write_atomic(&paths.index, &self.index.to_bytes()?).await?;
        write_atomic(&paths.store, &self.store.to_bytes()?).await?;

        Ok(())
    }

    /// Delete both artifacts. Idempotent; missing files are not an error.
    pub async fn reset(paths: &CorpusPaths) -> Result<(), QuizkitError> {
        for path in [&paths.index, &paths.store] {
            match tokio::fs::remove_file(path).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => map_err!(Err::<(), std::io::Error>(e)),
            }
        }
        Ok(())
    }
}

/// Write to a temp file next to the target, then rename over it.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), QuizkitError> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    map_err!(tokio::fs::write(&tmp, bytes).await);
    map_err!(tokio::fs::rename(&tmp, path).await);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizkitErr;

    fn test_paths(tag: &str) -> CorpusPaths {
        let dir = std::env::temp_dir().join(format!("__quizkit_corpus_{tag}__"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        CorpusPaths::new(&dir)
    }

    fn cleanup(paths: &CorpusPaths) {
        if let Some(dir) = paths.index.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn load_absent_corpus_is_none() {
        let paths = test_paths("absent");
        assert!(Corpus::load(&paths).await.unwrap().is_none());
        cleanup(&paths);
    }

    #[tokio::test]
    async fn persist_load_round_trip() {
        let paths = test_paths("round_trip");

        let mut corpus = Corpus::new(2);
        corpus
            .append(Chunk::new("first".to_string()), vec![1.0, 0.0])
            .unwrap();
        corpus
            .append(Chunk::new("second".to_string()), vec![0.0, 1.0])
            .unwrap();
        corpus.persist(&paths).await.unwrap();

        let loaded = Corpus::load(&paths).await.unwrap().unwrap();
        assert_eq!(corpus, loaded);

        let hits = loaded.search(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "first");

        cleanup(&paths);
    }

    #[test]
    fn append_keeps_members_in_lockstep() {
        let mut corpus = Corpus::new(3);
        corpus
            .append(Chunk::new("ok".to_string()), vec![0.0, 0.0, 1.0])
            .unwrap();

        // A rejected vector must not leave a dangling chunk behind.
        assert!(corpus
            .append(Chunk::new("bad".to_string()), vec![1.0])
            .is_err());

        assert_eq!(corpus.len(), 1);
    }

    #[tokio::test]
    async fn single_artifact_is_corrupt() {
        let paths = test_paths("half_pair");

        let mut corpus = Corpus::new(1);
        corpus
            .append(Chunk::new("only".to_string()), vec![1.0])
            .unwrap();
        corpus.persist(&paths).await.unwrap();

        std::fs::remove_file(&paths.index).unwrap();

        let err = Corpus::load(&paths).await.unwrap_err();
        assert!(matches!(err.error, QuizkitErr::CorruptCorpus(_)));

        cleanup(&paths);
    }

    #[tokio::test]
    async fn garbage_store_is_corrupt() {
        let paths = test_paths("garbage");

        let mut corpus = Corpus::new(1);
        corpus
            .append(Chunk::new("only".to_string()), vec![1.0])
            .unwrap();
        corpus.persist(&paths).await.unwrap();

        std::fs::write(&paths.store, b"not json at all").unwrap();

        let err = Corpus::load(&paths).await.unwrap_err();
        assert!(matches!(err.error, QuizkitErr::CorruptCorpus(_)));

        cleanup(&paths);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let paths = test_paths("reset");

        // Nothing to delete.
        Corpus::reset(&paths).await.unwrap();

        let mut corpus = Corpus::new(1);
        corpus
            .append(Chunk::new("gone soon".to_string()), vec![1.0])
            .unwrap();
        corpus.persist(&paths).await.unwrap();

        Corpus::reset(&paths).await.unwrap();
        Corpus::reset(&paths).await.unwrap();

        assert!(Corpus::load(&paths).await.unwrap().is_none());

        cleanup(&paths);
    }
}
