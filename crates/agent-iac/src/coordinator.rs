//! The IaC coordinator
//!
//! The coordinator never answers a request itself. It picks a specialist with
//! the keyword rules, breaks ties according to its [`RoutingStrategy`], and
//! hands the request to a [`DelegatingAgent`] keyed by specialist name.

use agent_core::{Agent, Context, Result};
use agent_runtime::{AgentRuntime, DelegatingAgent, Delegation, SimpleAgent, SimpleConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{IacConfig, RoutingStrategy};
use crate::prompts::{COORDINATOR, COORDINATOR_DESCRIPTION, routing_instruction};
use crate::router::{IacRouter, IacSpecialist};
use crate::specialists::specialist_agent;

/// Context key holding the route chosen for the current request
pub const ROUTE_KEY: &str = "iac.route";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteChoice {
    target: IacSpecialist,
    reason: String,
}

/// Routes infrastructure requests to `terraform_config_gen` or
/// `kubectl_manifest_gen`
pub struct IacCoordinator {
    router: IacRouter,
    delegator: DelegatingAgent,
    tiebreaker: SimpleAgent,
    strategy: RoutingStrategy,
    default_route: IacSpecialist,
}

impl IacCoordinator {
    /// Create the coordinator and both specialists
    pub fn new(runtime: &AgentRuntime, config: &IacConfig) -> Result<Self> {
        config.validate()?;
        let router = IacRouter::new()?;

        let default_route = config.default_route;
        let mut builder = DelegatingAgent::builder(COORDINATOR).description(COORDINATOR_DESCRIPTION);
        for specialist in IacSpecialist::ALL {
            builder = builder.add_agent(
                specialist.agent_name(),
                Arc::new(specialist_agent(runtime, config, specialist)),
            );
        }
        let delegator = builder
            .router(move |_input, ctx| match ctx.get_typed::<RouteChoice>(ROUTE_KEY) {
                Ok(Some(choice)) => Delegation::to(choice.target.agent_name()).because(choice.reason),
                _ => Delegation::to(default_route.agent_name())
                    .because("no route recorded; using the default route"),
            })
            .build()?;

        let tiebreaker = runtime.create_simple_agent(
            SimpleConfig {
                model: config.coordinator_model.clone(),
                system_prompt: routing_instruction(),
                max_tokens: config.max_tokens,
                temperature: 0.0,
            },
            COORDINATOR,
        );

        Ok(Self {
            router,
            delegator,
            tiebreaker,
            strategy: config.strategy,
            default_route,
        })
    }

    /// Keyword router used for the first pass
    pub fn router(&self) -> &IacRouter {
        &self.router
    }

    /// Names of the specialists requests can be routed to
    pub fn specialist_names(&self) -> Vec<&str> {
        self.delegator.agent_names()
    }

    /// Pick the specialist for `input`, with the reason for the choice
    pub async fn choose(&self, input: &str) -> (IacSpecialist, String) {
        let decision = self.router.classify(input);
        debug!(
            terraform = decision.terraform_score,
            kubernetes = decision.kubernetes_score,
            matched = ?decision.matched,
            "Classified IaC request"
        );

        if let Some(target) = decision.target {
            return (target, format!("keyword rules: {}", decision.summary()));
        }

        let summary = decision.summary();
        match self.strategy {
            RoutingStrategy::Rules => (
                self.default_route,
                format!("ambiguous ({summary}); using the default route"),
            ),
            RoutingStrategy::RulesThenModel => match self.ask_model(input).await {
                Some(target) => (
                    target,
                    format!("ambiguous ({summary}); chosen by the coordinator model"),
                ),
                None => (
                    self.default_route,
                    format!("ambiguous ({summary}); model gave no usable answer, using the default route"),
                ),
            },
        }
    }

    async fn ask_model(&self, input: &str) -> Option<IacSpecialist> {
        // Own context: the routing answer is not part of the conversation
        let mut scratch = Context::new();
        match self.tiebreaker.process(input.to_string(), &mut scratch).await {
            Ok(answer) => {
                let choice = IacSpecialist::from_answer(&answer);
                if choice.is_none() {
                    warn!(answer = %answer, "Coordinator model named no single specialist");
                }
                choice
            }
            Err(e) => {
                warn!(error = %e, "Coordinator model failed to route request");
                None
            }
        }
    }
}

#[async_trait]
impl Agent for IacCoordinator {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let (target, reason) = self.choose(&input).await;
        info!(target = %target, reason = %reason, "Routing IaC request");

        context.insert_typed(ROUTE_KEY, &RouteChoice { target, reason })?;
        let result = self.delegator.process(input, context).await;
        context.remove(ROUTE_KEY);
        result
    }

    fn name(&self) -> &str {
        COORDINATOR
    }

    fn description(&self) -> &str {
        COORDINATOR_DESCRIPTION
    }
}
