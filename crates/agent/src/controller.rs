//! The turn-loop controller.
//!
//! One inbound prompt drives a bounded loop: invoke the model, classify
//! the reply, record the step as an activity, and either continue or
//! terminate. Thoughts continue the loop; actions execute a tool and
//! continue; responses, elicitations, and errors end the turn. The loop
//! never exceeds its iteration budget, and every blocking call gets the
//! same timeout.

use std::sync::Arc;
use std::time::Duration;
use stepline_config::AgentConfig;
use stepline_core::activity::ActivityContent;
use stepline_core::error::{Error, ModelError, StoreError, ToolError};
use stepline_core::message::{Message, SessionId};
use stepline_core::model::ModelClient;
use stepline_core::store::ActivityStore;
use stepline_core::tool::ToolRegistry;
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::history::load_history;
use crate::params::parse_params;

/// The built-in system prompt teaching the model the marker protocol.
const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a step-by-step assistant. Every reply must start with exactly one marker:

THINKING: <your reasoning about what to do next>
ACTION: <toolName>(<params>) — invoke a tool and wait for its result
RESPONSE: <your final answer to the user>
ELICITATION: <a question back to the user when their request is ambiguous>
ERROR: <why you cannot proceed>

Available tools:
- getCoordinates(\"place name\") — resolve a place to latitude/longitude
- getWeather(lat,lon) — current weather at coordinates
- getTime(lat,lon) — current local time at coordinates

Latitude always precedes longitude. Use one marker per reply and chain
tools across replies as needed.";

/// How a turn ended.
#[derive(Debug)]
pub enum TurnEnd {
    /// The model produced a terminal reply (response, elicitation, or
    /// self-reported error), recorded as the final activity.
    Completed(ActivityContent),
    /// An iteration failed; the failure was recorded as an Error
    /// activity and the turn stopped.
    Faulted(String),
    /// The iteration budget ran out before a terminal reply.
    BudgetExhausted,
}

/// The outcome of handling one inbound prompt.
#[derive(Debug)]
pub struct TurnOutcome {
    pub end: TurnEnd,
    /// Model invocations consumed by this turn.
    pub iterations: u32,
}

/// The agent turn-loop controller.
pub struct AgentController {
    model: Arc<dyn ModelClient>,
    store: Arc<dyn ActivityStore>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: u32,
    courtesy_delay: Duration,
    call_timeout: Duration,
}

/// What one loop iteration decided.
enum StepOutcome {
    /// A thought or completed action — loop again.
    Continue,
    /// A terminal reply, already recorded.
    Terminal(ActivityContent),
}

impl AgentController {
    /// Create a controller with default limits.
    pub fn new(
        model: Arc<dyn ModelClient>,
        store: Arc<dyn ActivityStore>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            model,
            store,
            tools,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            courtesy_delay: Duration::from_millis(1000),
            call_timeout: Duration::from_secs(60),
        }
    }

    /// Apply limits and pacing from loaded configuration.
    pub fn with_agent_config(mut self, config: &AgentConfig) -> Self {
        self.max_iterations = config.max_iterations;
        self.courtesy_delay = Duration::from_millis(config.courtesy_delay_ms);
        self.call_timeout = Duration::from_secs(config.call_timeout_secs);
        if let Some(prompt) = &config.system_prompt {
            self.system_prompt = prompt.clone();
        }
        self
    }

    /// Override the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the maximum model invocations per turn.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the pause between loop iterations.
    pub fn with_courtesy_delay(mut self, delay: Duration) -> Self {
        self.courtesy_delay = delay;
        self
    }

    /// Set the timeout applied uniformly to model and tool calls.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Handle one inbound user prompt for a session.
    ///
    /// Records the prompt, reconstructs prior history from the store,
    /// and runs the bounded turn loop. Only store write failures
    /// propagate as errors — every other failure is contained within
    /// the turn and recorded as an Error activity.
    pub async fn handle_prompt(
        &self,
        session: &SessionId,
        prompt: &str,
    ) -> Result<TurnOutcome, StoreError> {
        info!(session = %session, "Handling inbound prompt");

        let history = load_history(self.store.as_ref(), session).await?;

        self.store
            .create_activity(
                session,
                ActivityContent::Prompt {
                    body: prompt.to_string(),
                },
            )
            .await?;

        // The new prompt leads the context; prior turns follow it.
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::human(prompt));
        messages.extend(history);

        let mut iterations = 0;
        while iterations < self.max_iterations {
            iterations += 1;
            debug!(session = %session, iteration = iterations, "Turn loop iteration");

            match self.step(session, &mut messages).await {
                Ok(StepOutcome::Terminal(content)) => {
                    info!(session = %session, iterations, "Turn completed");
                    return Ok(TurnOutcome {
                        end: TurnEnd::Completed(content),
                        iterations,
                    });
                }
                Ok(StepOutcome::Continue) => {
                    if iterations < self.max_iterations && !self.courtesy_delay.is_zero() {
                        tokio::time::sleep(self.courtesy_delay).await;
                    }
                }
                Err(Error::Store(e)) => return Err(e),
                Err(e) => {
                    warn!(session = %session, error = %e, "Turn iteration failed");
                    self.store
                        .create_activity(
                            session,
                            ActivityContent::Error {
                                body: e.to_string(),
                            },
                        )
                        .await?;
                    return Ok(TurnOutcome {
                        end: TurnEnd::Faulted(e.to_string()),
                        iterations,
                    });
                }
            }
        }

        warn!(session = %session, max_iterations = self.max_iterations, "Iteration budget exhausted");
        self.store
            .create_activity(
                session,
                ActivityContent::Error {
                    body: format!(
                        "Unable to complete the request within {} steps.",
                        self.max_iterations
                    ),
                },
            )
            .await?;

        Ok(TurnOutcome {
            end: TurnEnd::BudgetExhausted,
            iterations,
        })
    }

    /// Run one loop iteration: invoke the model, classify, record, and
    /// execute a tool if the reply asked for one.
    async fn step(
        &self,
        session: &SessionId,
        messages: &mut Vec<Message>,
    ) -> Result<StepOutcome, Error> {
        let raw = tokio::time::timeout(
            self.call_timeout,
            self.model.invoke(&self.system_prompt, messages),
        )
        .await
        .map_err(|_| ModelError::Timeout {
            timeout_secs: self.call_timeout.as_secs(),
        })??;

        messages.push(Message::assistant(&raw));

        let content = classify(&raw)?;
        match content {
            ActivityContent::Thought { body } => {
                self.store
                    .create_activity(session, ActivityContent::Thought { body })
                    .await?;
                Ok(StepOutcome::Continue)
            }

            ActivityContent::Action {
                tool, parameter, ..
            } => {
                // Announce the action before executing it; the pair of
                // records brackets the tool call in the timeline.
                self.store
                    .create_activity(
                        session,
                        ActivityContent::Action {
                            tool,
                            parameter: parameter.clone(),
                            result: None,
                        },
                    )
                    .await?;

                let params = parse_params(tool, parameter.as_deref())?;

                let result_text = match tokio::time::timeout(
                    self.call_timeout,
                    self.tools.execute(tool, params),
                )
                .await
                .map_err(|_| ToolError::Timeout {
                    tool: tool.to_string(),
                    timeout_secs: self.call_timeout.as_secs(),
                })
                .and_then(|r| r)
                {
                    Ok(text) => text,
                    // A failed lookup is still a result the model can
                    // react to; only the loop machinery escalates.
                    Err(e) => {
                        warn!(session = %session, tool = %tool, error = %e, "Tool execution failed");
                        format!("Error: {e}")
                    }
                };

                self.store
                    .create_activity(
                        session,
                        ActivityContent::Action {
                            tool,
                            parameter,
                            result: Some(result_text.clone()),
                        },
                    )
                    .await?;

                messages.push(Message::human(format!("Result of {tool}: {result_text}")));
                Ok(StepOutcome::Continue)
            }

            terminal @ (ActivityContent::Response { .. }
            | ActivityContent::Elicitation { .. }
            | ActivityContent::Error { .. }) => {
                self.store
                    .create_activity(session, terminal.clone())
                    .await?;
                Ok(StepOutcome::Terminal(terminal))
            }

            ActivityContent::Prompt { .. } => Err(Error::Internal(
                "classifier produced a prompt variant".into(),
            )),
        }
    }
}
