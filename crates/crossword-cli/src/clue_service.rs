//! Clue text sources
//!
//! - Local: bundled dictionary plus an optional JSON file
//! - Remote: chat-completions endpoint that writes clues on demand
//! - Mock: in-memory, test builds only
//!
//! The [`ClueManager`] asks the primary source under a timeout and fills
//! whatever is missing from the fallback. Failures never escape it.

use async_trait::async_trait;
use crossword_core::{Clue, ClueMap, Difficulty};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
use std::time::Duration;

pub type ClueResult<T> = Result<T, ClueError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClueError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0} backend unavailable")]
    Unavailable(&'static str),
}

/// A source of clues for a batch of words
#[async_trait]
pub trait ClueBackend: Send + Sync {
    /// Clues for as many of `words` as this source knows
    async fn fetch_clues(&self, words: &[String], difficulty: Difficulty) -> ClueResult<ClueMap>;

    fn is_available(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}

// ==================== Local Dictionary ====================

/// Bundled clues, optionally extended from a JSON file
pub struct LocalDictionary {
    clues: ClueMap,
}

impl LocalDictionary {
    pub fn builtin() -> Self {
        Self {
            clues: ClueMap::builtin(),
        }
    }

    /// Add entries from a `{"word": {"en": .., "zh": ..}}` file. File
    /// entries win over bundled ones.
    pub fn with_file(mut self, path: &Path) -> ClueResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ClueError::Storage(format!("{}: {}", path.display(), e)))?;
        let mut file_clues = ClueMap::from_json(&json)
            .map_err(|e| ClueError::Storage(format!("{}: {}", path.display(), e)))?;
        info!("Loaded {} clues from {}", file_clues.len(), path.display());
        file_clues.merge(self.clues);
        self.clues = file_clues;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }
}

#[async_trait]
impl ClueBackend for LocalDictionary {
    async fn fetch_clues(&self, words: &[String], _difficulty: Difficulty) -> ClueResult<ClueMap> {
        let mut found = ClueMap::new();
        found.fill_missing(words, &self.clues);
        Ok(found)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "Local"
    }
}

// ==================== Mock Backend for Testing ====================

/// In-memory clue source with switchable failure and latency
#[cfg(test)]
pub struct MockClueService {
    clues: Mutex<ClueMap>,
    available: Mutex<bool>,
    delay: Mutex<Duration>,
}

#[cfg(test)]
impl MockClueService {
    pub fn new(clues: ClueMap) -> Self {
        Self {
            clues: Mutex::new(clues),
            available: Mutex::new(true),
            delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn set_available(&self, available: bool) {
        if let Ok(mut flag) = self.available.lock() {
            *flag = available;
        }
    }

    pub fn set_delay(&self, delay: Duration) {
        if let Ok(mut d) = self.delay.lock() {
            *d = delay;
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ClueBackend for MockClueService {
    async fn fetch_clues(&self, words: &[String], _difficulty: Difficulty) -> ClueResult<ClueMap> {
        let delay = self.delay.lock().map(|d| *d).unwrap_or_default();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if !self.is_available() {
            return Err(ClueError::Network("Mock unavailable".into()));
        }

        let clues = self
            .clues
            .lock()
            .map_err(|e| ClueError::Storage(e.to_string()))?;
        let mut found = ClueMap::new();
        found.fill_missing(words, &*clues);
        Ok(found)
    }

    fn is_available(&self) -> bool {
        self.available.lock().map(|a| *a).unwrap_or(false)
    }

    fn backend_name(&self) -> &'static str {
        "Mock"
    }
}

// ==================== Remote Chat-Completions Backend ====================

/// Connection settings for the remote clue writer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl RemoteConfig {
    pub const DEFAULT_MODEL: &'static str = "default";

    /// Read `CROSSWORD_CLUE_API_URL`, `CROSSWORD_CLUE_API_KEY` and
    /// `CROSSWORD_CLUE_MODEL`. `None` without a URL.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("CROSSWORD_CLUE_API_URL").ok()?;
        Some(Self {
            base_url,
            api_key: std::env::var("CROSSWORD_CLUE_API_KEY").ok(),
            model: std::env::var("CROSSWORD_CLUE_MODEL")
                .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string()),
        })
    }
}

/// Asks an OpenAI-compatible chat endpoint to write clues
pub struct RemoteClueService {
    config: RemoteConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ChatError>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatError {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ClueItem {
    word: Option<String>,
    en: Option<String>,
    zh: Option<String>,
}

impl RemoteClueService {
    pub fn new(config: RemoteConfig) -> ClueResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClueError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// Instructions sent with each batch of words
pub fn clue_prompt(words: &[String], difficulty: Difficulty) -> String {
    format!(
        "You are a crossword puzzle creator. Create clues for these words: {}.\n\n\
         Rules:\n\
         1. Each clue should be short (under 40 characters if possible)\n\
         2. {}\n\
         3. Provide a natural Chinese translation for each clue\n\
         4. Return ONLY a JSON array, no other text\n\n\
         Format: [{{\"word\": \"cat\", \"en\": \"Furry pet that purrs\", \"zh\": \"会呼噜叫的毛茸茸宠物\"}}]",
        words.join(", "),
        difficulty.clue_style()
    )
}

/// Pull the clue array out of a model reply. A fenced code block is
/// unwrapped first; items missing any field are dropped.
pub fn parse_clue_reply(content: &str) -> ClueResult<ClueMap> {
    let body = strip_code_fence(content.trim());
    let items: Vec<ClueItem> = serde_json::from_str(body)
        .map_err(|e| ClueError::InvalidResponse(format!("expected JSON array: {}", e)))?;

    let mut clues = ClueMap::new();
    for item in items {
        if let (Some(word), Some(en), Some(zh)) = (item.word, item.en, item.zh) {
            if !word.is_empty() && !en.is_empty() && !zh.is_empty() {
                clues.insert(&word, Clue::new(en, zh));
            }
        }
    }
    Ok(clues)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let after = &text[open + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    match after.find("```") {
        Some(close) => after[..close].trim(),
        None => text,
    }
}

#[async_trait]
impl ClueBackend for RemoteClueService {
    async fn fetch_clues(&self, words: &[String], difficulty: Difficulty) -> ClueResult<ClueMap> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: clue_prompt(words, difficulty),
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: ChatResponse = builder
            .send()
            .await
            .map_err(|e| ClueError::Network(e.to_string()))?
            .json()
            .await
            .map_err(|e| ClueError::InvalidResponse(e.to_string()))?;

        if let Some(err) = response.error {
            return Err(ClueError::Server(
                err.message.unwrap_or_else(|| "API Error".to_string()),
            ));
        }
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ClueError::InvalidResponse("no content in response".to_string()))?;

        parse_clue_reply(&content)
    }

    fn is_available(&self) -> bool {
        !self.config.base_url.is_empty()
    }

    fn backend_name(&self) -> &'static str {
        "Remote"
    }
}

// ==================== Clue Manager ====================

/// Primary source with a bounded wait and a fallback for the gaps
pub struct ClueManager {
    primary: Arc<dyn ClueBackend>,
    fallback: Option<Arc<dyn ClueBackend>>,
    timeout: Duration,
}

impl std::fmt::Debug for ClueManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClueManager")
            .field("primary", &self.primary.backend_name())
            .field(
                "fallback",
                &self.fallback.as_ref().map(|f| f.backend_name()),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClueManager {
    pub fn new(primary: Arc<dyn ClueBackend>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback: None,
            timeout,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ClueBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    async fn fetch(
        &self,
        backend: &Arc<dyn ClueBackend>,
        words: &[String],
        difficulty: Difficulty,
    ) -> ClueResult<ClueMap> {
        if !backend.is_available() {
            return Err(ClueError::Unavailable(backend.backend_name()));
        }
        tokio::time::timeout(self.timeout, backend.fetch_clues(words, difficulty))
            .await
            .map_err(|_| ClueError::Timeout(self.timeout))?
    }

    /// Clues for `words`. Words no source knows are left out; the
    /// formatter gives them a placeholder.
    pub async fn clues_for(&self, words: &[String], difficulty: Difficulty) -> ClueMap {
        let mut clues = match self.fetch(&self.primary, words, difficulty).await {
            Ok(clues) => {
                info!(
                    "{} clue source returned {} of {} clues",
                    self.primary.backend_name(),
                    clues.len(),
                    words.len()
                );
                clues
            }
            Err(e) => {
                warn!(
                    "{} clue source failed: {}",
                    self.primary.backend_name(),
                    e
                );
                ClueMap::new()
            }
        };

        let Some(fallback) = &self.fallback else {
            return clues;
        };
        let missing: Vec<String> = words
            .iter()
            .filter(|w| !clues.contains(w))
            .cloned()
            .collect();
        if missing.is_empty() {
            return clues;
        }

        debug!(
            "asking {} for {} missing clue(s)",
            fallback.backend_name(),
            missing.len()
        );
        match self.fetch(fallback, &missing, difficulty).await {
            Ok(extra) => clues.merge(extra),
            Err(e) => warn!("{} clue source failed: {}", fallback.backend_name(), e),
        }
        clues
    }
}
