//! The three search tools.

use crate::error::PlaygroundError;
use crate::handle::ConfigHandle;
use crate::no_cache_headers;
use localsearch_core::{QueryForm, RawPayload, ResultView, SearchMode, SearchRequest, SearchResult};
use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Enabled,
    Disabled,
}

/// The submit button of one tool
#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
    disabled: Arc<AtomicBool>,
}

impl SubmitControl {
    pub fn state(&self) -> ControlState {
        if self.disabled.load(Ordering::Acquire) {
            ControlState::Disabled
        } else {
            ControlState::Enabled
        }
    }

    /// Disable the control for the lifetime of the guard. `None` while
    /// another submission holds it.
    pub fn try_acquire(&self) -> Option<SubmitGuard> {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                disabled: Arc::clone(&self.disabled),
            })
    }
}

/// Re-enables its control when dropped
#[derive(Debug)]
pub struct SubmitGuard {
    disabled: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.disabled.store(false, Ordering::Release);
    }
}

/// A completed search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub result: SearchResult,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn view(&self) -> ResultView {
        ResultView::render(self.request.mode, &self.result)
    }
}

#[derive(Debug, Clone)]
pub struct Playground {
    handle: ConfigHandle,
    client: Client,
    rag: SubmitControl,
    web: SubmitControl,
    agentic: SubmitControl,
}

impl Playground {
    pub fn new(handle: ConfigHandle) -> Self {
        Self::with_client(handle, Client::new())
    }

    pub fn with_client(handle: ConfigHandle, client: Client) -> Self {
        Self {
            handle,
            client,
            rag: SubmitControl::default(),
            web: SubmitControl::default(),
            agentic: SubmitControl::default(),
        }
    }

    pub fn control(&self, mode: SearchMode) -> &SubmitControl {
        match mode {
            SearchMode::Rag => &self.rag,
            SearchMode::Web => &self.web,
            SearchMode::Agentic => &self.agentic,
        }
    }

    pub async fn rag(&self, form: QueryForm) -> Result<SearchOutcome, PlaygroundError> {
        self.search(SearchMode::Rag, form).await
    }

    pub async fn web(&self, form: QueryForm) -> Result<SearchOutcome, PlaygroundError> {
        self.search(SearchMode::Web, form).await
    }

    pub async fn agentic(&self, form: QueryForm) -> Result<SearchOutcome, PlaygroundError> {
        self.search(SearchMode::Agentic, form).await
    }

    /// Validate, dispatch exactly one POST, normalize.
    ///
    /// The mode's control stays disabled until this returns or the future
    /// is dropped.
    pub async fn search(
        &self,
        mode: SearchMode,
        form: QueryForm,
    ) -> Result<SearchOutcome, PlaygroundError> {
        let _guard = self
            .control(mode)
            .try_acquire()
            .ok_or(PlaygroundError::Busy)?;

        let config = self.handle.snapshot();
        let request = form.into_request(mode, &config.defaults)?;
        let url = config.endpoint_url(mode.endpoint(&config.endpoints));
        let body = request.body();
        debug!(%mode, url = %url, query = %body.query, city = ?body.city, "Dispatching search");

        let started = Instant::now();
        let resp = self
            .client
            .post(&url)
            .headers(no_cache_headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| PlaygroundError::from_transport(e, &config.server.base_url))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PlaygroundError::from_transport(e, &config.server.base_url))?;

        if !status.is_success() {
            warn!(%mode, status = status.as_u16(), "Search failed");
            return Err(PlaygroundError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| PlaygroundError::InvalidResponse(e.to_string()))?;
        let result = RawPayload(payload).normalize();

        Ok(SearchOutcome {
            request,
            result,
            elapsed: started.elapsed(),
        })
    }
}
