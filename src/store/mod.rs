//! Content-addressed store: the `ContentStore` seam and upload types.
//!
//! The store accepts `{path, content}` pairs and returns one content
//! identifier per accepted file, in upload-completion order (the store may
//! reorder). Results are yielded as the store produces them; the sequence is
//! finite and not restartable.

#[cfg(feature = "http")]
pub mod http;

use crate::error::GatewayError;
use crate::multihash::Multihash;
use crate::shared::ContentId;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Cumulative-bytes progress callback invoked as the store reports progress.
pub type ProgressFn = Box<dyn FnMut(u64) + Send>;

/// A file handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub path: String,
    pub content: Vec<u8>,
}

impl FileSource {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Options for a batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Wrap the batch in a synthetic directory; the wrapper entry itself is
    /// filtered out of the result set.
    pub wrap_with_directory: bool,
    pub pin: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            wrap_with_directory: false,
            pin: true,
        }
    }
}

/// One accepted file: its content identifier plus the decomposed multihash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedFile {
    pub path: String,
    pub cid: ContentId,
    pub size: u64,
    #[serde(flatten)]
    pub multihash: Multihash,
}

/// Accepts a batch of files and returns content identifiers, optionally
/// pinned.
pub trait ContentStore: Send + Sync {
    /// Upload `files` and collect the per-file results.
    ///
    /// An empty batch short-circuits: no store call occurs and the result is
    /// empty. Upload failure propagates as a [`GatewayError`]; nothing
    /// uploaded before the failure is unpinned.
    fn add(
        &self,
        files: Vec<FileSource>,
        options: UploadOptions,
        progress: Option<ProgressFn>,
    ) -> impl Future<Output = Result<Vec<AddedFile>, GatewayError>> + Send;
}
