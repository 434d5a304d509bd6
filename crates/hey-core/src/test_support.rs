use futures::future::BoxFuture;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hey_error::{HeyError, Result};
use hey_registry::{RegistryEntry, RegistrySource};

use crate::installer::{InstallRequest, PackageInstaller};

/// In-memory registry that counts how often it is queried.
pub struct CountingRegistry {
    body: Mutex<Value>,
    calls: AtomicUsize,
}

impl CountingRegistry {
    pub fn new(body: Value) -> Self {
        Self {
            body: Mutex::new(body),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latest(version: &str) -> Self {
        Self::new(json!({
            "dist-tags": { "latest": version },
            "versions": { version: {} }
        }))
    }

    pub fn set_latest(&self, version: &str) {
        let mut body = self.body.lock().unwrap();
        body["dist-tags"]["latest"] = json!(version);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RegistrySource for CountingRegistry {
    fn base_url(&self) -> &str {
        "https://registry.example.test"
    }

    fn fetch_entry<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<RegistryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.body.lock().unwrap().clone();
        Box::pin(async move { Ok(RegistryEntry::from_json(name, &body)) })
    }
}

/// Installer that records requests and optionally fails them.
#[derive(Default)]
pub struct RecordingInstaller {
    requests: Mutex<Vec<InstallRequest>>,
    fail: bool,
}

impl RecordingInstaller {
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn requests(&self) -> Vec<InstallRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install<'a>(&'a self, request: &'a InstallRequest) -> BoxFuture<'a, Result<()>> {
        self.requests.lock().unwrap().push(request.clone());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(HeyError::Io("connection reset".to_string()));
            }
            Ok(())
        })
    }
}
