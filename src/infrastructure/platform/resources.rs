use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

/// Registry of short-lived, addressable binary objects.
///
/// Every `create` must be paired with exactly one `release` by whoever
/// holds the returned URI.
pub trait EphemeralResources: Send + Sync {
    /// Register a new object and return its URI
    fn create(&self, data: Bytes, mime: &str) -> String;

    /// Drop the object behind `uri`. Returns false if it was unknown.
    fn release(&self, uri: &str) -> bool;

    /// Resolve a live URI to its contents
    fn get(&self, uri: &str) -> Option<Bytes>;

    /// Number of objects not yet released
    fn live_count(&self) -> usize;
}

/// Process-local blob registry handing out `blob:<uuid>` URIs
#[derive(Default)]
pub struct InMemoryResources {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EphemeralResources for InMemoryResources {
    fn create(&self, data: Bytes, mime: &str) -> String {
        let uri = format!("blob:{}", Uuid::new_v4());
        tracing::debug!(uri = %uri, size = data.len(), mime = mime, "Ephemeral resource created");
        self.blobs.lock().insert(uri.clone(), data);
        uri
    }

    fn release(&self, uri: &str) -> bool {
        let released = self.blobs.lock().remove(uri).is_some();
        if released {
            tracing::debug!(uri = %uri, "Ephemeral resource released");
        } else {
            tracing::warn!(uri = %uri, "Release requested for unknown resource");
        }
        released
    }

    fn get(&self, uri: &str) -> Option<Bytes> {
        self.blobs.lock().get(uri).cloned()
    }

    fn live_count(&self) -> usize {
        self.blobs.lock().len()
    }
}
