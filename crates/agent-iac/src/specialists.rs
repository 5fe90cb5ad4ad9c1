//! Terraform and kubectl code generators

use agent_runtime::{AgentRuntime, SimpleAgent, SimpleConfig};

use crate::config::IacConfig;
use crate::prompts::{
    KUBECTL_MANIFEST_GEN_DESCRIPTION, KUBECTL_MANIFEST_GEN_INSTRUCTION,
    TERRAFORM_CONFIG_GEN_DESCRIPTION, TERRAFORM_CONFIG_GEN_INSTRUCTION,
};
use crate::router::IacSpecialist;

/// Build the agent for `specialist`
///
/// Each specialist answers in a single model turn with one code block, or
/// with clarifying questions when the request is underspecified.
pub fn specialist_agent(
    runtime: &AgentRuntime,
    config: &IacConfig,
    specialist: IacSpecialist,
) -> SimpleAgent {
    let (model, instruction, description) = match specialist {
        IacSpecialist::Terraform => (
            &config.terraform_model,
            TERRAFORM_CONFIG_GEN_INSTRUCTION,
            TERRAFORM_CONFIG_GEN_DESCRIPTION,
        ),
        IacSpecialist::Kubernetes => (
            &config.kubectl_model,
            KUBECTL_MANIFEST_GEN_INSTRUCTION,
            KUBECTL_MANIFEST_GEN_DESCRIPTION,
        ),
    };

    let simple = SimpleConfig {
        model: model.clone(),
        system_prompt: instruction.to_string(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };
    runtime
        .create_simple_agent(simple, specialist.agent_name())
        .with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{Agent, Context};
    use agent_llm::testing::{ScriptedProvider, text_response};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_terraform_specialist() {
        let llm = Arc::new(ScriptedProvider::with_responses(vec![text_response(
            "```hcl\nresource \"google_storage_bucket\" \"logs\" {}\n```",
        )]));
        let runtime = AgentRuntime::builder().provider(llm.clone()).build().unwrap();

        let agent = specialist_agent(&runtime, &IacConfig::default(), IacSpecialist::Terraform);
        assert_eq!(agent.name(), "terraform_config_gen");
        assert_eq!(agent.description(), TERRAFORM_CONFIG_GEN_DESCRIPTION);

        let out = agent
            .process("A bucket for logs".to_string(), &mut Context::new())
            .await
            .unwrap();
        assert!(out.contains("google_storage_bucket"));

        let request = &llm.requests()[0];
        assert_eq!(request.model, "gemini-2.5-pro");
        assert!(
            request
                .system
                .as_deref()
                .unwrap()
                .starts_with("You are an expert in Google Cloud and Terraform.")
        );
    }

    #[test]
    fn test_kubectl_specialist() {
        let runtime = AgentRuntime::builder()
            .provider(Arc::new(ScriptedProvider::new()))
            .build()
            .unwrap();
        let config = IacConfig::builder()
            .kubectl_model("gemini-2.5-flash")
            .build()
            .unwrap();

        let agent = specialist_agent(&runtime, &config, IacSpecialist::Kubernetes);
        assert_eq!(agent.name(), "kubectl_manifest_gen");
        assert_eq!(agent.config().model, "gemini-2.5-flash");
        assert!(agent.config().system_prompt.contains("Kubernetes YAML manifest"));
    }
}
