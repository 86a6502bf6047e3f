//! One question/answer exchange against the completion provider.

use tracing::{debug, warn};

use crate::{AiClient, AiError, Conversation, LearningLevel, Message, TokenUsage};

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub usage: TokenUsage,
}

/// Builds the prompt for a turn and records the exchange.
///
/// The subject restricts what the model is willing to answer; the learning
/// level is supplied per turn.
#[derive(Debug, Clone)]
pub struct TurnProcessor {
    subject: String,
}

impl TurnProcessor {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The system instruction sent first on every call. Never stored.
    pub fn system_instruction(&self, level: LearningLevel) -> Message {
        let subject = &self.subject;
        Message::system(format!(
            "You are an AI tutor specialized in answering only {subject}-related questions. \
             If the user asks anything outside {subject}, politely refuse to answer. \
             Provide responses based on the user's learning level: {level}."
        ))
    }

    /// `[system] ++ history ++ [utterance]`, in that order.
    pub fn build_prompt(
        &self,
        level: LearningLevel,
        utterance: &str,
        conversation: &Conversation,
    ) -> Vec<Message> {
        let mut prompt = Vec::with_capacity(conversation.len() + 2);
        prompt.push(self.system_instruction(level));
        prompt.extend(conversation.all().iter().cloned());
        prompt.push(Message::user(utterance));
        prompt
    }

    /// Ask the provider once and record the exchange.
    ///
    /// Both messages are appended only after the provider answers, user
    /// first. On error the conversation is left untouched and the error is
    /// returned as-is.
    pub async fn handle_turn(
        &self,
        level: LearningLevel,
        utterance: &str,
        conversation: &mut Conversation,
        client: &dyn AiClient,
    ) -> Result<TurnOutcome, AiError> {
        let prompt = self.build_prompt(level, utterance, conversation);
        debug!(%level, history = conversation.len(), "Sending turn to provider");

        let response = client.send_message(&prompt).await.map_err(|e| {
            warn!(error = %e, "Turn failed, conversation unchanged");
            e
        })?;

        conversation.append_user(utterance);
        conversation.append_assistant(response.content.clone());

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Turn recorded"
        );

        Ok(TurnOutcome {
            reply: response.content,
            usage: response.usage,
        })
    }
}

impl Default for TurnProcessor {
    fn default() -> Self {
        Self::new("Data Science")
    }
}
