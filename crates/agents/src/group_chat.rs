//! Group chat engine: a user proxy and assistant agents taking turns until a
//! termination rule fires.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use retail_agents_core::{
    ChatMessage, EXIT_SENTINEL, HUMAN_INPUT_PROMPT, TERMINATE_MARKER, USER_PROXY_NAME,
};
use retail_agents_llm::{ChatModel, FunctionCall, Message};

use crate::error::{AgentError, ToolCallError};
use crate::role::AgentRole;
use crate::scenario::{Scenario, SpeakerSelection};
use crate::tools::{Tool, ToolExecutor, ToolKind, ToolOutput};
use crate::vision::{ImageCaptioner, extract_image_urls, image_parts};

/// Tool round trips allowed within one agent turn.
pub const MAX_TOOL_HOPS: usize = 5;

/// Source of the customer's replies when the user proxy speaks.
#[async_trait]
pub trait HumanInput: Send + Sync {
    /// Show `prompt` and wait for the reply. Returns `exit` when no reply will come.
    async fn get_human_input(&self, prompt: &str) -> String;
}

/// Receives every message of the conversation as it is produced.
pub trait MessageSink: Send + Sync {
    fn publish(&self, message: ChatMessage);
}

/// Collaborators a conversation runs against.
#[derive(Clone)]
pub struct ChatRuntime {
    pub model: Arc<dyn ChatModel>,
    pub tools: Arc<dyn ToolExecutor>,
    pub human: Arc<dyn HumanInput>,
    pub sink: Arc<dyn MessageSink>,
}

/// Author of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    UserProxy,
    Agent(AgentRole),
    /// Result of a tool call made by an agent.
    Tool(ToolKind),
}

impl Speaker {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserProxy => USER_PROXY_NAME,
            Self::Agent(role) => role.name(),
            Self::Tool(kind) => kind.name(),
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    /// Images referenced by `content`.
    pub images: Vec<String>,
    /// `content` with image captions appended, for agents that cannot see images.
    pub captioned: Option<String>,
}

impl Turn {
    fn text_for_readers(&self) -> &str {
        self.captioned.as_deref().unwrap_or(&self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// An agent replied with the termination marker.
    Terminated,
    /// The customer asked to stop, or the input wait timed out.
    HumanExit,
    MaxRounds,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reason: EndReason,
    pub rounds: usize,
    pub transcript: Vec<Turn>,
}

/// Whether a customer reply ends the conversation.
#[must_use]
pub fn is_exit_reply(reply: &str) -> bool {
    let normalized = reply
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_ascii_lowercase();
    matches!(normalized.as_str(), EXIT_SENTINEL | "no" | "no thanks" | "no thank you" | "thank you")
}

/// Configuration of one multi-agent conversation.
#[derive(Debug, Clone)]
pub struct GroupChat {
    scenario: Scenario,
    roles: Vec<AgentRole>,
    max_round: usize,
    selection: SpeakerSelection,
    vision: bool,
}

impl GroupChat {
    #[must_use]
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            roles: scenario.roles().to_vec(),
            max_round: scenario.max_round(),
            selection: scenario.speaker_selection(),
            vision: scenario.vision(),
        }
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<AgentRole>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub const fn with_max_round(mut self, max_round: usize) -> Self {
        self.max_round = max_round;
        self
    }

    #[must_use]
    pub const fn with_selection(mut self, selection: SpeakerSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub const fn with_vision(mut self, vision: bool) -> Self {
        self.vision = vision;
        self
    }

    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    fn participants(&self) -> Vec<Speaker> {
        std::iter::once(Speaker::UserProxy)
            .chain(self.roles.iter().copied().map(Speaker::Agent))
            .collect()
    }

    /// Run the conversation from the user proxy's opening message to termination.
    ///
    /// # Errors
    /// Returns an error if a model call or a tool's database call fails.
    pub async fn run(&self, runtime: &ChatRuntime, opening: String) -> Result<ChatOutcome, AgentError> {
        let mut conversation = Conversation {
            chat: self,
            runtime,
            participants: self.participants(),
            history: Vec::new(),
            captioner: ImageCaptioner::new(),
        };
        tracing::info!(scenario = %self.scenario, agents = self.roles.len(), "group chat started");

        conversation.record(Speaker::UserProxy, opening).await?;
        let mut rounds = 1;
        let mut last = Speaker::UserProxy;

        let reason = loop {
            if rounds >= self.max_round {
                break EndReason::MaxRounds;
            }
            rounds += 1;

            let next = conversation.select_speaker(last).await?;
            match next {
                Speaker::Agent(role) => {
                    let reply = conversation.agent_reply(role).await?;
                    let terminated = reply.contains(TERMINATE_MARKER);
                    conversation.record(next, reply).await?;
                    if terminated {
                        break EndReason::Terminated;
                    }
                },
                Speaker::UserProxy | Speaker::Tool(_) => {
                    let reply = runtime.human.get_human_input(HUMAN_INPUT_PROMPT).await;
                    if is_exit_reply(&reply) {
                        break EndReason::HumanExit;
                    }
                    if reply.trim().is_empty() {
                        tracing::debug!("empty human reply, passing the turn");
                    } else {
                        conversation.record(Speaker::UserProxy, reply).await?;
                    }
                },
            }
            last = next;
        };

        tracing::info!(?reason, rounds, "group chat finished");
        Ok(ChatOutcome { reason, rounds, transcript: conversation.history })
    }
}

struct Conversation<'a> {
    chat: &'a GroupChat,
    runtime: &'a ChatRuntime,
    participants: Vec<Speaker>,
    history: Vec<Turn>,
    captioner: ImageCaptioner,
}

impl Conversation<'_> {
    /// Append a turn to the history and relay it to the sink.
    async fn record(&mut self, speaker: Speaker, content: String) -> Result<(), AgentError> {
        let images = if self.chat.vision { extract_image_urls(&content) } else { Vec::new() };
        let captioned = if images.is_empty() {
            None
        } else {
            Some(self.captioner.annotate(self.runtime.model.as_ref(), &content, &images).await?)
        };
        tracing::debug!(sender = %speaker, images = images.len(), "message relayed");
        self.runtime.sink.publish(ChatMessage::new(speaker.name(), content.clone()));
        self.history.push(Turn { speaker, content, images, captioned });
        Ok(())
    }

    fn round_robin_after(&self, last: Speaker) -> Speaker {
        let position = self.participants.iter().position(|p| *p == last).unwrap_or(0);
        self.participants
            .get((position + 1) % self.participants.len())
            .copied()
            .unwrap_or(Speaker::UserProxy)
    }

    async fn select_speaker(&self, last: Speaker) -> Result<Speaker, AgentError> {
        if self.participants.len() <= 2 || self.chat.selection == SpeakerSelection::RoundRobin {
            return Ok(self.round_robin_after(last));
        }

        let reply = self.runtime.model.complete(&self.runtime.model.request(self.selection_messages())).await?;
        let chosen = reply.content.as_deref().and_then(|text| self.match_participant(text));
        Ok(match chosen {
            Some(Speaker::UserProxy) if last == Speaker::UserProxy => self.round_robin_after(last),
            Some(speaker) => speaker,
            None => {
                tracing::warn!(reply = ?reply.content, "speaker selection unparseable, using round robin");
                self.round_robin_after(last)
            },
        })
    }

    fn selection_messages(&self) -> Vec<Message> {
        let names: Vec<&str> = self.participants.iter().map(|p| p.name()).collect();
        let roster = self
            .participants
            .iter()
            .map(|p| match p {
                Speaker::Agent(role) => format!("{}: {}", role.name(), role.description()),
                Speaker::UserProxy | Speaker::Tool(_) => {
                    format!("{USER_PROXY_NAME}: {}", self.chat.scenario.user_proxy_message())
                },
            })
            .collect::<Vec<_>>()
            .join("\n");
        let agent_list = names.join(", ");

        let mut messages = vec![Message::system(format!(
            "You are in a role play game. The following roles are available:\n{roster}.\n\n\
             Read the following conversation.\nThen select the next role from [{agent_list}] to play. Only return the role."
        ))];
        messages.extend(
            self.history
                .iter()
                .map(|turn| Message::user(turn.text_for_readers()).named(turn.speaker.name())),
        );
        messages.push(Message::system(format!(
            "Read the above conversation. Then select the next role from [{agent_list}] to play. Only return the role."
        )));
        messages
    }

    fn match_participant(&self, reply: &str) -> Option<Speaker> {
        let cleaned = reply.trim().trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.'));
        if let Some(exact) = self.participants.iter().find(|p| p.name() == cleaned) {
            return Some(*exact);
        }
        let mut by_length = self.participants.clone();
        by_length.sort_by_key(|p| std::cmp::Reverse(p.name().len()));
        by_length.into_iter().find(|p| cleaned.contains(p.name()))
    }

    /// Conversation as seen by `role`.
    fn agent_messages(&self, role: AgentRole) -> Vec<Message> {
        let mut messages = vec![Message::system(role.system_message())];
        for turn in &self.history {
            let message = if turn.speaker == Speaker::Agent(role) {
                Message::assistant(turn.content.clone())
            } else if role.is_multimodal() && !turn.images.is_empty() {
                Message::user_parts(image_parts(&turn.content, &turn.images))
                    .named(turn.speaker.name())
            } else {
                Message::user(turn.text_for_readers()).named(turn.speaker.name())
            };
            messages.push(message);
        }
        messages
    }

    /// Ask `role` for its reply, running any tool calls it makes.
    async fn agent_reply(&mut self, role: AgentRole) -> Result<String, AgentError> {
        let model = Arc::clone(&self.runtime.model);
        let definitions: Vec<_> = role.tools().iter().map(|kind| kind.definition()).collect();
        let mut messages = self.agent_messages(role);

        for hop in 0..=MAX_TOOL_HOPS {
            let request = model.request(messages.clone()).with_tools(definitions.clone());
            let reply = model.complete(&request).await?;
            if !reply.has_tool_calls() {
                return Ok(reply.content.unwrap_or_default());
            }
            if hop == MAX_TOOL_HOPS {
                tracing::warn!(agent = %role, "tool call limit reached");
                return Ok(reply.content.unwrap_or_default());
            }

            messages.push(Message::assistant_tool_calls(reply.content.clone(), reply.tool_calls.clone()));
            for call in reply.tool_calls {
                let text = match self.run_tool(role, &call.function).await? {
                    Ok((kind, output)) => {
                        let content = output.text.clone();
                        self.record_tool_output(kind, output).await?;
                        self.history.last().map_or(content, |turn| turn.text_for_readers().to_owned())
                    },
                    Err(e) => {
                        tracing::warn!(agent = %role, error = %e, "rejected tool call");
                        format!("Error: {e}")
                    },
                };
                messages.push(Message::tool(call.id, text));
            }
        }
        Ok(String::new())
    }

    /// Outer error ends the conversation; inner error goes back to the model.
    async fn run_tool(
        &self,
        role: AgentRole,
        call: &FunctionCall,
    ) -> Result<Result<(ToolKind, ToolOutput), ToolCallError>, AgentError> {
        let tool = match Tool::parse(call) {
            Ok(tool) if role.can_call(tool.kind()) => tool,
            Ok(tool) => {
                return Ok(Err(ToolCallError::NotPermitted {
                    tool: tool.kind().name().to_owned(),
                    agent: role.name().to_owned(),
                }));
            },
            Err(e) => return Ok(Err(e)),
        };
        let output = self.runtime.tools.execute(&tool).await?;
        Ok(Ok((tool.kind(), output)))
    }

    async fn record_tool_output(&mut self, kind: ToolKind, output: ToolOutput) -> Result<(), AgentError> {
        let mut content = output.text;
        for url in output.image_urls.into_iter().filter(|_| self.chat.vision) {
            if !extract_image_urls(&content).contains(&url) {
                content.push_str(&format!("\n<img {url}>"));
            }
        }
        self.record(Speaker::Tool(kind), content).await
    }
}

#[cfg(test)]
#[path = "group_chat_tests.rs"]
mod tests;
