//! IPFS HTTP store — `IpfsHttpStore`.
//!
//! Posts a multipart batch to the node's `add` endpoint and parses the
//! streamed NDJSON response incrementally: progress lines feed the caller's
//! callback, result lines become `AddedFile`s, and the synthetic directory
//! wrapper entry is dropped.

use crate::config::StoreConfig;
use crate::error::GatewayError;
use crate::multihash;
use crate::shared::ContentId;
use crate::store::{AddedFile, ContentStore, FileSource, ProgressFn, UploadOptions};

use futures_util::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// HTTP client for an IPFS-compatible store API.
pub struct IpfsHttpStore {
    api_url: String,
    client: Client,
}

/// One NDJSON line from the add endpoint: either a progress report
/// (`Bytes`) or a completed entry (`Hash` + `Size`).
#[derive(Debug, Deserialize)]
struct AddLine {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Hash")]
    hash: Option<String>,
    #[serde(rename = "Size")]
    size: Option<String>,
    #[serde(rename = "Bytes")]
    bytes: Option<u64>,
}

impl IpfsHttpStore {
    pub fn new(config: &StoreConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(Duration::from_secs(120)).build()?;
        Ok(Self {
            api_url: config.api_url(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn add_batch(
        &self,
        files: Vec<FileSource>,
        options: UploadOptions,
        mut progress: Option<ProgressFn>,
    ) -> Result<Vec<AddedFile>, GatewayError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/api/v0/add?wrap-with-directory={}&pin={}&progress=true&cid-version=0",
            self.api_url, options.wrap_with_directory, options.pin
        );

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content).file_name(file.path);
            form = form.part("file", part);
        }

        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let lines = ndjson_lines(resp.bytes_stream());
        futures_util::pin_mut!(lines);

        let mut results = Vec::new();
        while let Some(line) = lines.next().await {
            let line = line?;
            let entry: AddLine = serde_json::from_str(&line)
                .map_err(|e| GatewayError::MalformedResponse(format!("{}: {}", e, line)))?;

            if let Some(bytes) = entry.bytes {
                if let Some(cb) = progress.as_mut() {
                    cb(bytes);
                }
                continue;
            }

            if let Some(added) = collect_entry(&options, entry)? {
                tracing::debug!(path = %added.path, cid = %added.cid, "stored file");
                results.push(added);
            }
        }

        Ok(results)
    }
}

/// Turn a completed NDJSON entry into an `AddedFile`, dropping the directory
/// wrapper marker (empty path when wrapping).
fn collect_entry(
    options: &UploadOptions,
    entry: AddLine,
) -> Result<Option<AddedFile>, GatewayError> {
    let Some(hash) = entry.hash else {
        return Ok(None);
    };
    if options.wrap_with_directory && entry.name.is_empty() {
        return Ok(None);
    }

    let decomposed = multihash::decode(&hash)
        .map_err(|e| GatewayError::MalformedResponse(format!("bad cid {}: {}", hash, e)))?;
    let size = entry
        .size
        .as_deref()
        .unwrap_or("0")
        .parse::<u64>()
        .unwrap_or(0);

    Ok(Some(AddedFile {
        path: entry.name,
        cid: ContentId::new(hash),
        size,
        multihash: decomposed,
    }))
}

/// Split a byte stream into trimmed, non-empty NDJSON lines.
fn ndjson_lines<S, B>(stream: S) -> impl Stream<Item = Result<String, GatewayError>>
where
    S: Stream<Item = Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    async_stream::try_stream! {
        let mut buf: Vec<u8> = Vec::new();
        futures_util::pin_mut!(stream);
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buf.extend_from_slice(chunk.as_ref());
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line).trim().to_string();
                if !line.is_empty() {
                    yield line;
                }
            }
        }
        let rest = String::from_utf8_lossy(&buf).trim().to_string();
        if !rest.is_empty() {
            yield rest;
        }
    }
}

impl ContentStore for IpfsHttpStore {
    async fn add(
        &self,
        files: Vec<FileSource>,
        options: UploadOptions,
        progress: Option<ProgressFn>,
    ) -> Result<Vec<AddedFile>, GatewayError> {
        self.add_batch(files, options, progress).await
    }
}

impl Clone for IpfsHttpStore {
    fn clone(&self) -> Self {
        Self {
            api_url: self.api_url.clone(),
            client: self.client.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> AddLine {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_batch_makes_no_call() {
        // A store pointed at an unroutable endpoint still succeeds on an
        // empty batch because it never reaches the network.
        let store = IpfsHttpStore::new(&StoreConfig {
            protocol: "http".to_string(),
            host: "203.0.113.1".to_string(),
            port: 1,
        })
        .unwrap();
        let result =
            tokio_test::block_on(store.add(Vec::new(), UploadOptions::default(), None)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_collect_entry_builds_added_file() {
        let options = UploadOptions::default();
        let entry = line(
            r#"{"Name":"proposal-1.md","Hash":"QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG","Size":"42"}"#,
        );
        let added = collect_entry(&options, entry).unwrap().unwrap();
        assert_eq!(added.path, "proposal-1.md");
        assert_eq!(added.size, 42);
        assert_eq!(added.multihash.hash_function, 0x12);
    }

    #[test]
    fn test_collect_entry_drops_wrapper_marker() {
        let options = UploadOptions {
            wrap_with_directory: true,
            pin: true,
        };
        let wrapper = line(r#"{"Name":"","Hash":"QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB"}"#);
        assert!(collect_entry(&options, wrapper).unwrap().is_none());

        // Same entry without wrapping is a legitimate result
        let options = UploadOptions::default();
        let entry = line(r#"{"Name":"","Hash":"QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB"}"#);
        assert!(collect_entry(&options, entry).unwrap().is_some());
    }

    #[test]
    fn test_collect_entry_rejects_bad_cid() {
        let options = UploadOptions::default();
        let entry = line(r#"{"Name":"x","Hash":"0OIl"}"#);
        assert!(matches!(
            collect_entry(&options, entry),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_progress_line_has_no_hash() {
        let entry = line(r#"{"Name":"proposal-1.md","Bytes":2048}"#);
        assert_eq!(entry.bytes, Some(2048));
        assert!(entry.hash.is_none());
    }

    #[test]
    fn test_ndjson_lines_reassembles_chunks() {
        let chunks: Vec<Result<&[u8], reqwest::Error>> = vec![
            Ok(b"{\"a\":1}\n{\"b\""),
            Ok(b":2}\r\n\n"),
            Ok(b"{\"c\":3}"),
        ];
        let collected: Vec<String> = tokio_test::block_on(async {
            let lines = ndjson_lines(futures_util::stream::iter(chunks));
            futures_util::pin_mut!(lines);
            let mut out = Vec::new();
            while let Some(l) = lines.next().await {
                out.push(l.unwrap());
            }
            out
        });
        assert_eq!(collected, vec!["{\"a\":1}", "{\"b\":2}", "{\"c\":3}"]);
    }
}
