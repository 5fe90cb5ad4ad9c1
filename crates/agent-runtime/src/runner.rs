//! Runs a root agent against a session and streams its events

use crate::session::{InMemorySessionService, SessionError};
use agent_core::{Agent, AgentEvent, Context, EventSink, Result};
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Stream of events from one run; ends after a `Final` or `Error` event
pub type EventStream = Pin<Box<dyn Stream<Item = AgentEvent> + Send>>;

/// Records events on the session and forwards them to the stream
struct RecordingSink {
    tx: mpsc::UnboundedSender<AgentEvent>,
    sessions: Arc<InMemorySessionService>,
    session_id: String,
}

impl EventSink for RecordingSink {
    fn emit(&self, event: AgentEvent) {
        if let Err(e) = self.sessions.append_event(&self.session_id, event.clone()) {
            warn!(session_id = %self.session_id, error = %e, "Could not record event");
        }
        // receiver may have been dropped by the caller; the run continues
        let _ = self.tx.send(event);
    }
}

/// Executes a root agent for a user message within a session
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{InMemorySessionService, Runner};
/// use agent_core::Agent;
/// use futures::StreamExt;
/// use std::sync::Arc;
///
/// # async fn example(agent: Arc<dyn Agent>) -> agent_core::Result<()> {
/// let sessions = Arc::new(InMemorySessionService::new());
/// let session = sessions.create_session("stock_picker", "user_1");
/// let runner = Runner::new("stock_picker", agent, sessions);
///
/// let mut events = runner.run("user_1", &session.id, "Should I buy MSFT?")?;
/// while let Some(event) = events.next().await {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Runner {
    app_name: String,
    agent: Arc<dyn Agent>,
    sessions: Arc<InMemorySessionService>,
}

impl Runner {
    /// Create a runner for a root agent
    pub fn new(
        app_name: impl Into<String>,
        agent: Arc<dyn Agent>,
        sessions: Arc<InMemorySessionService>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            agent,
            sessions,
        }
    }

    /// Application name sessions are scoped to
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The session store
    pub fn sessions(&self) -> &Arc<InMemorySessionService> {
        &self.sessions
    }

    /// Start a run and return its event stream
    ///
    /// The session must exist for this runner's app and `user_id`. The agent
    /// runs on a spawned task; dropping the stream does not cancel it. A
    /// panicking agent ends the stream with an `Error` event.
    pub fn run(
        &self,
        user_id: &str,
        session_id: &str,
        message: impl Into<String>,
    ) -> Result<EventStream> {
        if self
            .sessions
            .get_session(&self.app_name, user_id, session_id)
            .is_none()
        {
            return Err(SessionError::NotFound(session_id.to_string()).into());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(RecordingSink {
            tx,
            sessions: self.sessions.clone(),
            session_id: session_id.to_string(),
        });

        let mut ctx = Context::new()
            .with_app_name(self.app_name.clone())
            .with_user_id(user_id)
            .with_session_id(session_id)
            .with_event_sink(sink.clone());

        let agent = self.agent.clone();
        let message = message.into();
        info!(
            app_name = %self.app_name,
            user_id,
            session_id,
            agent = %agent.name(),
            "Run started"
        );

        let name = agent.name().to_string();
        tokio::spawn(async move {
            // inner task so a panicking agent still ends the stream
            let task = tokio::spawn(async move { agent.process(message, &mut ctx).await });
            let event = match task.await {
                Ok(Ok(text)) => {
                    info!(agent = %name, response_length = text.len(), "Run finished");
                    AgentEvent::Final { agent: name, text }
                }
                Ok(Err(e)) => {
                    error!(agent = %name, error = %e, "Run failed");
                    AgentEvent::Error {
                        agent: name,
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    error!(agent = %name, error = %e, "Run aborted");
                    AgentEvent::Error {
                        agent: name,
                        message: format!("agent task aborted: {e}"),
                    }
                }
            };
            sink.emit(event);
        });

        Ok(Box::pin(futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;

    struct Chatty;

    #[async_trait]
    impl Agent for Chatty {
        async fn process(&self, input: String, context: &mut Context) -> Result<String> {
            context.emit(AgentEvent::Text {
                agent: "Chatty".to_string(),
                text: format!("thinking about {input}"),
            });
            assert_eq!(context.user_id(), Some("user_1"));
            Ok("done".to_string())
        }

        fn name(&self) -> &str {
            "Chatty"
        }
    }

    struct Failing;

    #[async_trait]
    impl Agent for Failing {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Err(agent_core::Error::ProcessingFailed("boom".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[tokio::test]
    async fn test_stream_ends_with_final_and_records() {
        let sessions = Arc::new(InMemorySessionService::new());
        let session = sessions.create_session("app", "user_1");
        let runner = Runner::new("app", Arc::new(Chatty), sessions.clone());

        let events: Vec<AgentEvent> = runner
            .run("user_1", &session.id, "MSFT")
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], AgentEvent::Final { text, .. } if text == "done"));
        assert_eq!(sessions.events(&session.id).unwrap(), events);
    }

    #[tokio::test]
    async fn test_error_event() {
        let sessions = Arc::new(InMemorySessionService::new());
        let session = sessions.create_session("app", "u");
        let runner = Runner::new("app", Arc::new(Failing), sessions);

        let events: Vec<AgentEvent> = runner.run("u", &session.id, "x").unwrap().collect().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AgentEvent::Error { message, .. } if message.contains("boom")));
    }

    struct Panicking;

    #[async_trait]
    impl Agent for Panicking {
        async fn process(&self, _input: String, context: &mut Context) -> Result<String> {
            context.emit(AgentEvent::Text {
                agent: "Panicking".to_string(),
                text: "starting".to_string(),
            });
            panic!("agent blew up");
        }

        fn name(&self) -> &str {
            "Panicking"
        }
    }

    #[tokio::test]
    async fn test_panicking_agent_ends_with_error() {
        let sessions = Arc::new(InMemorySessionService::new());
        let session = sessions.create_session("app", "u");
        let runner = Runner::new("app", Arc::new(Panicking), sessions.clone());

        let events: Vec<AgentEvent> = runner.run("u", &session.id, "x").unwrap().collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            AgentEvent::Error { agent, message } if agent == "Panicking" && message.contains("panicked")
        ));
        assert_eq!(sessions.events(&session.id).unwrap(), events);
    }

    #[tokio::test]
    async fn test_unknown_session_rejected() {
        let runner = Runner::new(
            "app",
            Arc::new(Chatty),
            Arc::new(InMemorySessionService::new()),
        );
        assert!(runner.run("u", "nope", "x").is_err());
    }
}
