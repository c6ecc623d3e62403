use crate::agent::LlmClientTrait;
use crate::types::{FunctionCall, Message, ToolSchema};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded call: the history sent and the tool names offered.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub tools: Option<Vec<String>>,
}

enum Scripted {
    Reply(Message),
    Failure(String),
}

#[derive(Clone)]
pub struct MockLlmClient {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    call_history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_text_response(&self, content: &str) {
        self.push(Scripted::Reply(Message::assistant(content)));
    }

    pub fn add_function_call_response(&self, name: &str, args: &str) {
        let response = Message {
            role: "assistant".to_string(),
            content: None,
            function_call: Some(FunctionCall {
                name: name.to_string(),
                arguments: args.to_string(),
            }),
            name: None,
        };
        self.push(Scripted::Reply(response));
    }

    pub fn add_error_response(&self, error_msg: &str) {
        self.push(Scripted::Failure(error_msg.to_string()));
    }

    pub fn get_call_history(&self) -> Vec<RecordedCall> {
        self.call_history.lock().unwrap().clone()
    }

    fn push(&self, scripted: Scripted) {
        self.responses.lock().unwrap().push_back(scripted);
    }
}

#[async_trait]
impl LlmClientTrait for MockLlmClient {
    async fn complete_chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> Result<Message> {
        // Store the call for verification
        self.call_history.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            tools: tools.map(|t| t.iter().map(|s| s.name.clone()).collect()),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Reply(message)) => Ok(message),
            Some(Scripted::Failure(msg)) => Err(anyhow::anyhow!(msg)),
            None => Err(anyhow::anyhow!("No mock response available")),
        }
    }
}
