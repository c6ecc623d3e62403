use crate::dispatcher::ToolDispatcher;
use crate::hotel_client::HotelApi;
use crate::llm_client::LlmClient;
use crate::prompt::SYSTEM_PROMPT;
use crate::session::Conversation;
use crate::tool_registry::ToolRegistry;
use crate::types::{Message, ToolSchema};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::{Duration, timeout};
use tracing::{debug, warn};

#[async_trait]
pub trait LlmClientTrait: Send + Sync {
    async fn complete_chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<Message>;
}

// Implement trait for real LlmClient
#[async_trait]
impl LlmClientTrait for LlmClient {
    async fn complete_chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<Message> {
        LlmClient::complete_chat(self, messages, tools).await
    }
}

#[derive(Clone, Debug)]
pub struct AgentOptions {
    pub step_timeout: Duration, // per model call
    pub system_prompt: String,  // seeds conversations that arrive empty
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(90),
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    /// Content of the last assistant reply.
    pub reply: Option<String>,
    /// Full history including everything appended during this turn.
    pub messages: Vec<Message>,
}

/// A user turn allows at most one tool call, so the walk is
/// first reply → (tool result) → final reply → done.
enum TurnState {
    AwaitingFirstReply,
    AwaitingFinalReply,
    Done(Option<String>),
}

pub struct Agent {
    llm: Arc<dyn LlmClientTrait>,
    dispatcher: ToolDispatcher,
    tools: ToolRegistry,
    opts: AgentOptions,
}

impl Agent {
    pub fn new(
        llm: Arc<dyn LlmClientTrait>,
        hotel: Arc<dyn HotelApi>,
        tools: ToolRegistry,
        opts: AgentOptions,
    ) -> Self {
        Self {
            llm,
            dispatcher: ToolDispatcher::new(hotel),
            tools,
            opts,
        }
    }

    pub async fn run_turn(
        &self,
        history: Vec<Message>,
        user_input: &str,
    ) -> anyhow::Result<TurnOutcome> {
        let mut conversation = Conversation::resume_or_seed(history, &self.opts.system_prompt);
        conversation.add_message(Message::user(user_input));

        let mut state = TurnState::AwaitingFirstReply;
        loop {
            state = match state {
                TurnState::AwaitingFirstReply => {
                    let reply = self.step(&conversation).await?;
                    conversation.add_message(reply.clone());

                    match self.dispatcher.dispatch(&reply).await {
                        Some(tool_result) => {
                            conversation.add_message(tool_result);
                            TurnState::AwaitingFinalReply
                        }
                        None => TurnState::Done(reply.content),
                    }
                }
                TurnState::AwaitingFinalReply => {
                    let reply = self.step(&conversation).await?;
                    if let Some(call) = &reply.function_call {
                        warn!(
                            tool = %call.name,
                            "model requested a second tool call in one turn; not dispatched"
                        );
                    }
                    let content = reply.content.clone();
                    conversation.add_message(reply);
                    TurnState::Done(content)
                }
                TurnState::Done(reply) => {
                    return Ok(TurnOutcome {
                        reply,
                        messages: conversation.into_messages(),
                    });
                }
            };
        }
    }

    // Single model call with both tools on offer
    async fn step(&self, conversation: &Conversation) -> anyhow::Result<Message> {
        debug!(messages = conversation.len(), "calling model");
        let reply = timeout(
            self.opts.step_timeout,
            self.llm
                .complete_chat(conversation.messages(), Some(self.tools.schemas())),
        )
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "model call timed out after {}s",
                self.opts.step_timeout.as_secs()
            )
        })??;
        Ok(reply)
    }
}
