//! Deterministic reasoning providers.
//!
//! A [`ScriptedProvider`] answers from a queue of canned replies and echoes
//! the prompt once the queue runs dry. It stands in for a real backend when
//! wiring a router or a council without network access.

use super::ProviderKind;
use crate::config::FileCouncilMember;
use async_trait::async_trait;
use conclave_application::{AskOptions, ProviderError, ReasoningProvider};
use conclave_domain::util::preview;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

const DEFAULT_ROLE: &str = "generalist";
const SCRIPTED_MODEL: &str = "scripted";

pub struct ScriptedProvider {
    name: String,
    role: String,
    model: String,
    kind: ProviderKind,
    available: AtomicBool,
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            role: DEFAULT_ROLE.to_string(),
            model: SCRIPTED_MODEL.to_string(),
            kind,
            available: AtomicBool::new(true),
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, ProviderKind::Local)
    }

    pub fn remote(name: impl Into<String>) -> Self {
        Self::new(name, ProviderKind::Remote)
    }

    /// Council member described in the `[council]` config section.
    pub fn from_member(member: &FileCouncilMember) -> Self {
        let mut provider = Self::local(member.name.clone()).with_role(member.role.clone());
        if let Some(model) = &member.model {
            provider = provider.with_model(model.clone());
        }
        provider
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        if !role.trim().is_empty() {
            self.role = role;
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Queue a reply; replies are consumed in order.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    pub fn with_failure(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, reply: Result<String, ProviderError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    fn next_reply(&self) -> Option<Result<String, ProviderError>> {
        self.replies.lock().ok()?.pop_front()
    }
}

#[async_trait]
impl ReasoningProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        // Remote backends have no liveness probe
        match self.kind {
            ProviderKind::Local => self.available.load(Ordering::SeqCst),
            ProviderKind::Remote => true,
        }
    }

    async fn ask(
        &self,
        prompt: &str,
        _system: &str,
        options: &AskOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.kind == ProviderKind::Local && !self.available.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable(self.name.clone()));
        }
        debug!(
            "{} ({}) asked with {} history messages: {}",
            self.name,
            self.kind,
            options.history.len(),
            preview(prompt, 60)
        );

        match self.next_reply() {
            Some(reply) => reply,
            None => Ok(format!("{}: {}", self.name, prompt.trim())),
        }
    }
}
