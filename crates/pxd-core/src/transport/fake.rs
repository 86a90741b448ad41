//! In-memory mirror used by unit tests. Counts every request it serves.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HeadResult, Transport, TransportError};

#[derive(Debug, Default)]
pub(crate) struct FakeMirror {
    resources: HashMap<String, (String, Vec<u8>)>,
    pub(crate) heads: AtomicUsize,
    pub(crate) gets: AtomicUsize,
}

impl FakeMirror {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, content_type: &str, body: &[u8]) -> Self {
        self.resources
            .insert(url.to_string(), (content_type.to_string(), body.to_vec()));
        self
    }

    pub(crate) fn head_count(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }

    pub(crate) fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl Transport for FakeMirror {
    fn head(&self, url: &str) -> Result<HeadResult, TransportError> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        Ok(match self.resources.get(url) {
            Some((ct, _)) => HeadResult {
                status: 200,
                content_type: Some(ct.clone()),
            },
            None => HeadResult {
                status: 404,
                content_type: Some("text/html".to_string()),
            },
        })
    }

    fn get_into(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        match self.resources.get(url) {
            Some((_, body)) => {
                sink.write_all(body).map_err(TransportError::Sink)?;
                Ok(body.len() as u64)
            }
            None => Err(TransportError::Http(404)),
        }
    }
}
