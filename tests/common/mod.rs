// ABOUTME: Shared test utilities: scripted LLM provider double and request builders
// ABOUTME: Used by orchestrator and route integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;

use fitforge_server::{
    errors::{AppError, ErrorCode},
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
};

/// What the scripted provider should do on each call
pub enum Script {
    /// Return this completion text
    Reply(&'static str),
    /// Fail as if the remote service were unreachable
    Fail,
}

/// Test double standing in for the remote generation service
pub struct ScriptedProvider {
    script: Script,
}

impl ScriptedProvider {
    pub fn replying(content: &'static str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(content),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { script: Script::Fail })
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match self.script {
            Script::Reply(content) => Ok(ChatResponse {
                content: content.to_owned(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Script::Fail => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Scripted Test Provider request timed out after 20s",
            )),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(matches!(self.script, Script::Reply(_)))
    }
}
