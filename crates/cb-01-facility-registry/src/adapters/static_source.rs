//! In-memory Facility Source for tests and fixtures.

use crate::error::{RegistryError, RegistryResult};
use crate::ports::outbound::FacilitySource;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves scripted responses in order, then repeats the last one forever.
pub struct StaticFacilitySource {
    script: Mutex<VecDeque<RegistryResult<Vec<u8>>>>,
    last: RegistryResult<Vec<u8>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl StaticFacilitySource {
    /// Always return `payload`.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self::scripted(vec![Ok(payload.into())])
    }

    /// Always fail with `error`.
    pub fn failing(error: RegistryError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Return each response once in order; the final one repeats.
    pub fn scripted(responses: Vec<RegistryResult<Vec<u8>>>) -> Self {
        let mut script: VecDeque<_> = responses.into();
        let last = script
            .pop_back()
            .unwrap_or_else(|| Err(RegistryError::unreachable("empty script")));
        Self {
            script: Mutex::new(script),
            last,
            delay: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` before answering each fetch.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FacilitySource for StaticFacilitySource {
    async fn fetch(&self) -> RegistryResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().pop_front();
        match next {
            Some(response) => response,
            None => self.last.clone(),
        }
    }

    fn describe(&self) -> String {
        "static://in-memory".to_string()
    }
}
