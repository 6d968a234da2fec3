//! Stateful multi-turn consultation chat.
//!
//! The session is seeded with the metaphysics system instruction carrying
//! the serialized chart and a language directive, and replays its full
//! turn history on every request. A failed turn leaves the history as it
//! was, so the same message can simply be sent again.

use zendestiny_core::{BaziResult, Language};

use crate::client::GeminiClient;
use crate::error::FortuneError;
use crate::prompt;
use crate::types::{Content, GenerateRequest};

pub struct ChatSession<'a> {
    client: &'a GeminiClient,
    system: String,
    greeting: String,
    history: Vec<Content>,
}

impl<'a> ChatSession<'a> {
    #[must_use]
    pub fn new(
        client: &'a GeminiClient,
        chart: &BaziResult,
        language: Language,
        current_year: i32,
    ) -> Self {
        Self {
            client,
            system: prompt::system_instruction(chart, language, current_year),
            greeting: prompt::greeting(chart, language),
            history: Vec::new(),
        }
    }

    /// The canned opening line shown before the first turn.
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Number of turns exchanged so far (user and model counted separately).
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    /// Sends one user message and returns the model's complete reply.
    ///
    /// # Errors
    ///
    /// Returns [`FortuneError`] on transport or API failure; the failed
    /// user message is not recorded in the history.
    pub async fn send(&mut self, message: &str) -> Result<String, FortuneError> {
        self.history.push(Content::user(message));
        let request = self.request();

        match self.client.generate(&request).await {
            Ok(reply) => {
                self.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    /// Sends one user message over the streaming endpoint, invoking
    /// `on_chunk` with each text fragment as it arrives, and returns the
    /// full reply once the stream ends.
    ///
    /// Only a completed stream is recorded in the history; a stream that
    /// fails partway leaves the session exactly as it was, even though some
    /// fragments may already have been shown.
    ///
    /// # Errors
    ///
    /// Returns [`FortuneError`] on transport or API failure.
    pub async fn send_streamed<F>(
        &mut self,
        message: &str,
        on_chunk: F,
    ) -> Result<String, FortuneError>
    where
        F: FnMut(&str),
    {
        self.history.push(Content::user(message));
        let request = self.request();

        match self.client.generate_stream(&request, on_chunk).await {
            Ok(reply) => {
                self.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    fn request(&self) -> GenerateRequest {
        GenerateRequest {
            contents: self.history.clone(),
            system_instruction: Some(Content::system(self.system.clone())),
            generation_config: None,
        }
    }
}
