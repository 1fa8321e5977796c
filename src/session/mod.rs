//! Conversation session: the ordered turn history plus the parameters used
//! to continue it.

use bon::Builder;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::config::DEFAULT_AGENT_NAME;
use crate::error::{ColloqError, Result};
use crate::models::ChatModel;
use crate::types::{Role, Turn};

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f64 = 0.0;
/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f64 = 2.0;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Parameters a session is created from.
///
/// ```
/// use colloq::session::{ConversationSession, SessionConfig};
///
/// let config = SessionConfig::builder()
///     .model("llama-3.1-8b-instant")
///     .temperature(0.2)
///     .system_prompt("be terse")
///     .build();
/// let session = ConversationSession::new(config)?;
/// assert_eq!(session.len(), 1);
/// # Ok::<(), colloq::error::ColloqError>(())
/// ```
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct SessionConfig {
    /// Display name of the agent.
    #[builder(into, default = DEFAULT_AGENT_NAME.to_string())]
    pub name: String,
    #[builder(into, default)]
    pub model: ChatModel,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    /// Blank prompts are treated as absent.
    #[builder(into)]
    pub system_prompt: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Ordered turn history of one conversation.
///
/// At most one system turn exists and it is always `history()[0]`: the only
/// way to get one is through the configured system prompt, and the append
/// operations only add user and assistant turns.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    name: String,
    model: ChatModel,
    temperature: f64,
    system_prompt: Option<String>,
    turns: Vec<Turn>,
    started_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Create a session, seeding the system turn if a prompt is configured.
    pub fn new(config: SessionConfig) -> Result<Self> {
        validate_temperature(config.temperature)?;

        let system_prompt = config
            .system_prompt
            .filter(|prompt| !prompt.trim().is_empty());

        let mut session = Self {
            id: Uuid::new_v4(),
            name: config.name,
            model: config.model,
            temperature: config.temperature,
            system_prompt,
            turns: Vec::new(),
            started_at: Utc::now(),
        };
        session.seed();
        Ok(session)
    }

    /// Append a user turn. Text that is empty after trimming is rejected.
    pub fn append_user(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ColloqError::InvalidInput(
                "user message must not be empty".into(),
            ));
        }
        self.turns.push(Turn::user(text));
        Ok(())
    }

    /// Append an assistant turn. Endpoint output is stored verbatim.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    /// Drop every turn, then re-seed the system turn if one is configured.
    pub fn reset(&mut self) {
        debug!(session = %self.id, dropped = self.turns.len(), "session reset");
        self.turns.clear();
        self.seed();
    }

    /// The turns, in conversational order.
    pub fn history(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of user turns so far.
    pub fn user_turns(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.role() == Role::User)
            .count()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &ChatModel {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn seed(&mut self) {
        if let Some(prompt) = &self.system_prompt {
            self.turns.push(Turn::system(prompt.clone()));
        }
    }
}

/// Check a temperature against the accepted `[0.0, 2.0]` range.
pub fn validate_temperature(temperature: f64) -> Result<()> {
    if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        Ok(())
    } else {
        Err(ColloqError::InvalidArgument(format!(
            "temperature must be within [{MIN_TEMPERATURE}, {MAX_TEMPERATURE}], got {temperature}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with_prompt(prompt: Option<&str>) -> ConversationSession {
        let config = SessionConfig::builder()
            .maybe_system_prompt(prompt.map(str::to_string))
            .build();
        ConversationSession::new(config).unwrap()
    }

    #[test]
    fn new_session_seeds_system_turn() {
        let session = session_with_prompt(Some("be terse"));
        assert_eq!(session.history(), &[Turn::system("be terse")]);
    }

    #[test]
    fn new_session_without_prompt_is_empty() {
        let session = session_with_prompt(None);
        assert!(session.is_empty());
        assert_eq!(session.system_prompt(), None);
    }

    #[test]
    fn blank_system_prompt_is_ignored() {
        let session = session_with_prompt(Some("   "));
        assert!(session.is_empty());
        assert_eq!(session.system_prompt(), None);
    }

    #[test]
    fn appends_keep_call_order() {
        let mut session = session_with_prompt(Some("sys"));
        session.append_user("one").unwrap();
        session.append_assistant("two");
        session.append_user("three").unwrap();
        session.append_assistant("four");

        assert_eq!(
            session.history(),
            &[
                Turn::system("sys"),
                Turn::user("one"),
                Turn::assistant("two"),
                Turn::user("three"),
                Turn::assistant("four"),
            ]
        );
        assert_eq!(session.user_turns(), 2);
        assert_eq!(session.last_turn(), Some(&Turn::assistant("four")));
    }

    #[test]
    fn consecutive_user_turns_are_allowed() {
        let mut session = session_with_prompt(None);
        session.append_user("first").unwrap();
        session.append_user("second").unwrap();
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn empty_user_text_is_rejected() {
        let mut session = session_with_prompt(Some("sys"));
        for text in ["", "   ", "\n\t"] {
            let err = session.append_user(text).unwrap_err();
            assert!(matches!(err, ColloqError::InvalidInput(_)));
        }
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn user_text_is_stored_untrimmed() {
        let mut session = session_with_prompt(None);
        session.append_user("  hi  ").unwrap();
        assert_eq!(session.history()[0].content(), "  hi  ");
    }

    #[test]
    fn empty_assistant_text_is_accepted() {
        let mut session = session_with_prompt(None);
        session.append_assistant("");
        assert_eq!(session.history(), &[Turn::assistant("")]);
    }

    #[test]
    fn reset_restores_seed_only() {
        let mut session = session_with_prompt(Some("sys"));
        for i in 0..10 {
            session.append_user(format!("q{i}")).unwrap();
            session.append_assistant(format!("a{i}"));
        }
        session.reset();
        assert_eq!(session.history(), &[Turn::system("sys")]);

        session.reset();
        assert_eq!(session.history(), &[Turn::system("sys")]);
    }

    #[test]
    fn reset_without_prompt_empties_history() {
        let mut session = session_with_prompt(None);
        session.append_user("hello").unwrap();
        session.reset();
        assert!(session.is_empty());
    }

    #[test]
    fn history_is_stable_without_mutation() {
        let mut session = session_with_prompt(Some("sys"));
        session.append_user("hi").unwrap();
        let first = session.history().to_vec();
        let second = session.history().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        for temperature in [0.0, 0.7, 2.0] {
            let config = SessionConfig::builder().temperature(temperature).build();
            assert!(ConversationSession::new(config).is_ok());
        }
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        for temperature in [-0.1, 2.01, f64::NAN] {
            let config = SessionConfig::builder().temperature(temperature).build();
            let err = ConversationSession::new(config).unwrap_err();
            assert!(matches!(err, ColloqError::InvalidArgument(_)));
        }
    }

    #[test]
    fn defaults_match_builder_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.name, DEFAULT_AGENT_NAME);
        assert_eq!(config.model, ChatModel::Llama33_70bVersatile);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.system_prompt, None);
    }
}
