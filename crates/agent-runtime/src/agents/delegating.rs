//! Delegating agent implementation (routes to sub-agents)

use agent_core::{Agent, AgentEvent, Context, Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// A routing decision: which sub-agent handles the request, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// Key of the selected sub-agent
    pub target: String,
    /// Human-readable reason recorded on the `Delegated` event
    pub reason: String,
}

impl Delegation {
    /// Delegate to `target` with no particular reason
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reason: String::new(),
        }
    }

    /// Attach a reason
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl From<String> for Delegation {
    fn from(target: String) -> Self {
        Self::to(target)
    }
}

impl From<&str> for Delegation {
    fn from(target: &str) -> Self {
        Self::to(target)
    }
}

type Router = Box<dyn Fn(&str, &Context) -> Delegation + Send + Sync>;

/// An agent that delegates to sub-agents based on routing logic
///
/// DelegatingAgent provides a hierarchical agent structure where a manager
/// agent routes requests to specialized worker agents. The selected agent
/// runs in the caller's context, and a `Delegated` event records the choice.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::DelegatingAgent;
/// use agent_core::{Agent, Context};
/// use std::sync::Arc;
///
/// # async fn example(
/// #     terraform: Arc<dyn Agent>,
/// #     kubectl: Arc<dyn Agent>,
/// # ) -> agent_core::Result<()> {
/// let delegator = DelegatingAgent::builder("Coordinator")
///     .add_agent("terraform_config_gen", terraform)
///     .add_agent("kubectl_manifest_gen", kubectl)
///     .router(|input, _ctx| {
///         if input.contains("Deployment") {
///             "kubectl_manifest_gen"
///         } else {
///             "terraform_config_gen"
///         }
///     })
///     .build()?;
///
/// let mut context = Context::new();
/// let response = delegator.process("A Deployment for nginx".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct DelegatingAgent {
    sub_agents: BTreeMap<String, Arc<dyn Agent>>,
    router: Router,
    name: String,
    description: String,
}

impl DelegatingAgent {
    /// Create a new builder for delegating agent
    pub fn builder(name: impl Into<String>) -> DelegatingAgentBuilder {
        DelegatingAgentBuilder::new(name)
    }

    /// Get the number of sub-agents
    pub fn agent_count(&self) -> usize {
        self.sub_agents.len()
    }

    /// Get the list of available agent names, sorted
    pub fn agent_names(&self) -> Vec<&str> {
        self.sub_agents.keys().map(String::as_str).collect()
    }

    /// Resolve the routing decision for an input without running anything
    pub fn route(&self, input: &str, context: &Context) -> Delegation {
        (self.router)(input, context)
    }
}

#[async_trait]
impl Agent for DelegatingAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let delegation = self.route(&input, context);

        let agent = self
            .sub_agents
            .get(&delegation.target)
            .ok_or_else(|| Error::AgentNotFound {
                name: delegation.target.clone(),
                available: self.sub_agents.keys().cloned().collect(),
            })?;

        info!(
            agent = %self.name,
            target = %delegation.target,
            reason = %delegation.reason,
            "Delegating request"
        );
        context.emit(AgentEvent::Delegated {
            agent: self.name.clone(),
            target: delegation.target.clone(),
            reason: delegation.reason,
        });

        agent.process(input, context).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for DelegatingAgent
pub struct DelegatingAgentBuilder {
    sub_agents: BTreeMap<String, Arc<dyn Agent>>,
    router: Option<Router>,
    name: String,
    description: String,
}

impl DelegatingAgentBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            sub_agents: BTreeMap::new(),
            router: None,
            name: name.into(),
            description: String::new(),
        }
    }

    /// Add a sub-agent
    ///
    /// # Arguments
    ///
    /// * `key` - The key to identify this agent in routing
    /// * `agent` - The agent to add
    pub fn add_agent(mut self, key: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        self.sub_agents.insert(key.into(), agent);
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the routing function
    ///
    /// The router receives the input string and context, and returns the
    /// key of the agent that should handle the request, either as a plain
    /// string or as a [`Delegation`] carrying a reason.
    pub fn router<F, R>(mut self, router: F) -> Self
    where
        F: Fn(&str, &Context) -> R + Send + Sync + 'static,
        R: Into<Delegation>,
    {
        self.router = Some(Box::new(move |input, ctx| router(input, ctx).into()));
        self
    }

    /// Build the delegating agent
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No router function is set
    /// - No sub-agents are added
    pub fn build(self) -> Result<DelegatingAgent> {
        let router = self
            .router
            .ok_or_else(|| Error::InitializationFailed("Router function not set".to_string()))?;

        if self.sub_agents.is_empty() {
            return Err(Error::InitializationFailed("No sub-agents added".to_string()));
        }

        Ok(DelegatingAgent {
            sub_agents: self.sub_agents,
            router,
            name: self.name,
            description: self.description,
        })
    }
}
