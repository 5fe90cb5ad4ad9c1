//! Keyword routing between the Terraform and kubectl specialists
//!
//! Each side has a table of weighted phrases. Matching is case-insensitive,
//! on word boundaries and tolerant of plurals ("VMs", "policies"). Longer
//! phrases claim their span of the query first, so "service account" scores
//! once for Terraform and is not also read as a Kubernetes "service".

use crate::error::{IacError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Keyword tables, lowercase, `(phrase, weight)`
mod keywords {
    /// Provisioning core Google Cloud infrastructure
    pub const TERRAFORM: &[(&str, u32)] = &[
        ("terraform", 5),
        ("hcl", 4),
        ("google_compute_instance", 5),
        ("google_storage_bucket", 5),
        ("google_project_service", 5),
        ("gke cluster", 4),
        ("node pool", 3),
        ("vpc network", 4),
        ("vpc", 3),
        ("subnet", 3),
        ("subnetwork", 3),
        ("firewall rule", 3),
        ("cloud nat", 3),
        ("cloud router", 3),
        ("compute engine", 3),
        ("compute instance", 3),
        ("instance template", 3),
        ("virtual machine", 3),
        ("vm", 3),
        ("cloud storage", 3),
        ("storage bucket", 3),
        ("bucket", 2),
        ("gcs", 2),
        ("iam policy", 4),
        ("iam binding", 3),
        ("iam role", 3),
        ("iam", 3),
        ("service account", 3),
        ("cloud sql", 3),
        ("bigquery", 3),
        ("pubsub", 2),
        ("pub/sub", 2),
        ("dns zone", 2),
        ("artifact registry", 2),
        ("enable api", 2),
        ("provision", 2),
        ("project", 1),
        ("infrastructure", 1),
    ];

    /// Deploying and configuring workloads inside a cluster
    pub const KUBERNETES: &[(&str, u32)] = &[
        ("kubectl", 5),
        ("kubernetes manifest", 5),
        ("k8s", 4),
        ("manifest", 3),
        ("yaml", 2),
        ("deployment", 3),
        ("deploy", 3),
        ("service", 2),
        ("ingress", 3),
        ("configmap", 3),
        ("config map", 3),
        ("secret", 2),
        ("pod", 3),
        ("replica", 2),
        ("replicaset", 3),
        ("statefulset", 3),
        ("daemonset", 3),
        ("cronjob", 3),
        ("namespace", 2),
        ("helm chart", 3),
        ("horizontal pod autoscaler", 4),
        ("hpa", 3),
        ("persistent volume claim", 3),
        ("pvc", 3),
        ("container image", 2),
        ("container", 1),
        ("expose", 2),
        ("in the cluster", 3),
        ("inside the cluster", 3),
        ("to the cluster", 3),
        ("in my cluster", 3),
        ("on my cluster", 3),
        ("to my cluster", 3),
        ("in my gke cluster", 3),
        ("on my gke cluster", 3),
        ("to my gke cluster", 3),
        ("kubernetes", 2),
    ];
}

/// The two code-generating specialists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IacSpecialist {
    /// `terraform_config_gen`
    Terraform,
    /// `kubectl_manifest_gen`
    Kubernetes,
}

impl IacSpecialist {
    pub const ALL: [Self; 2] = [Self::Terraform, Self::Kubernetes];

    /// Agent name of the specialist
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::Terraform => "terraform_config_gen",
            Self::Kubernetes => "kubectl_manifest_gen",
        }
    }

    /// Find the specialist a free-text answer names
    ///
    /// Exact agent names win; otherwise "terraform" or "kubectl"/"kubernetes"
    /// is accepted. Returns `None` if the answer names both or neither.
    pub fn from_answer(answer: &str) -> Option<Self> {
        let lower = answer.to_lowercase();
        let pick = |terraform: bool, kubernetes: bool| match (terraform, kubernetes) {
            (true, false) => Some(Self::Terraform),
            (false, true) => Some(Self::Kubernetes),
            _ => None,
        };

        let by_name = pick(
            lower.contains(Self::Terraform.agent_name()),
            lower.contains(Self::Kubernetes.agent_name()),
        );
        by_name.or_else(|| {
            pick(
                lower.contains("terraform"),
                lower.contains("kubectl") || lower.contains("kubernetes"),
            )
        })
    }
}

impl fmt::Display for IacSpecialist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.agent_name())
    }
}

impl FromStr for IacSpecialist {
    type Err = IacError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terraform_config_gen" | "terraform" => Ok(Self::Terraform),
            "kubectl_manifest_gen" | "kubectl" | "kubernetes" => Ok(Self::Kubernetes),
            other => Err(IacError::UnknownSpecialist(other.to_string())),
        }
    }
}

/// Outcome of classifying one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    /// Winning specialist, `None` when the scores tie
    pub target: Option<IacSpecialist>,
    pub terraform_score: u32,
    pub kubernetes_score: u32,
    /// Phrases that contributed to a score, in claim order
    pub matched: Vec<String>,
}

impl RouteDecision {
    /// Whether the rules could not pick a side
    pub fn is_ambiguous(&self) -> bool {
        self.target.is_none()
    }

    /// One-line summary for logs and delegation events
    pub fn summary(&self) -> String {
        format!(
            "terraform {} vs kubernetes {} (matched: {})",
            self.terraform_score,
            self.kubernetes_score,
            if self.matched.is_empty() {
                "nothing".to_string()
            } else {
                self.matched.join(", ")
            }
        )
    }
}

struct Rule {
    phrase: &'static str,
    weight: u32,
    side: IacSpecialist,
    pattern: Regex,
}

/// Rule-table classifier for IaC requests
pub struct IacRouter {
    /// Longest phrase first
    rules: Vec<Rule>,
}

impl fmt::Debug for IacRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IacRouter")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl IacRouter {
    /// Compile the keyword tables
    pub fn new() -> Result<Self> {
        let tables = [
            (IacSpecialist::Terraform, keywords::TERRAFORM),
            (IacSpecialist::Kubernetes, keywords::KUBERNETES),
        ];

        let mut rules = Vec::new();
        for (side, table) in tables {
            for &(phrase, weight) in table {
                let pattern =
                    Regex::new(&phrase_pattern(phrase)).map_err(|e| IacError::InvalidPattern {
                        phrase: phrase.to_string(),
                        reason: e.to_string(),
                    })?;
                rules.push(Rule {
                    phrase,
                    weight,
                    side,
                    pattern,
                });
            }
        }
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.phrase.len()));

        Ok(Self { rules })
    }

    /// Score `query` against both tables
    ///
    /// Each phrase counts once no matter how often it appears.
    pub fn classify(&self, query: &str) -> RouteDecision {
        let mut claimed: Vec<Range<usize>> = Vec::new();
        let mut terraform_score = 0;
        let mut kubernetes_score = 0;
        let mut matched = Vec::new();

        for rule in &self.rules {
            let mut hit = false;
            for m in rule.pattern.find_iter(query) {
                let span = m.range();
                if claimed.iter().any(|c| c.start < span.end && span.start < c.end) {
                    continue;
                }
                claimed.push(span);
                hit = true;
            }
            if !hit {
                continue;
            }

            match rule.side {
                IacSpecialist::Terraform => terraform_score += rule.weight,
                IacSpecialist::Kubernetes => kubernetes_score += rule.weight,
            }
            matched.push(rule.phrase.to_string());
        }

        let target = match terraform_score.cmp(&kubernetes_score) {
            std::cmp::Ordering::Greater => Some(IacSpecialist::Terraform),
            std::cmp::Ordering::Less => Some(IacSpecialist::Kubernetes),
            std::cmp::Ordering::Equal => None,
        };

        RouteDecision {
            target,
            terraform_score,
            kubernetes_score,
            matched,
        }
    }
}

/// Case-insensitive, word-bounded, plural-tolerant pattern for `phrase`
fn phrase_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    let mut body = words.join(r"[\s_-]+");

    match body.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) => {
            body = format!("{stem}(?:y|ies)");
        }
        _ => body.push_str("(?:s|es)?"),
    }
    format!(r"(?i)\b{body}\b")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(query: &str) -> RouteDecision {
        IacRouter::new().unwrap().classify(query)
    }

    #[test]
    fn test_terraform_requests() {
        for query in [
            "Create a GCS bucket named logs with versioning enabled",
            "I need a VPC network with two subnets in us-central1",
            "Provision a GKE cluster with 3 nodes",
            "Write terraform for a Cloud SQL postgres instance",
        ] {
            assert_eq!(
                classify(query).target,
                Some(IacSpecialist::Terraform),
                "{query}"
            );
        }
    }

    #[test]
    fn test_kubernetes_requests() {
        for query in [
            "Create a Deployment for nginx with 3 replicas and expose it with a Service",
            "I need an Ingress for my web app",
            "Give me a ConfigMap holding the app settings",
            "Deploy redis to my GKE cluster",
        ] {
            assert_eq!(
                classify(query).target,
                Some(IacSpecialist::Kubernetes),
                "{query}"
            );
        }
    }

    #[test]
    fn test_longest_phrase_claims_span() {
        let decision = classify("Create a service account for the CI pipeline");

        assert_eq!(decision.target, Some(IacSpecialist::Terraform));
        assert!(decision.matched.contains(&"service account".to_string()));
        assert!(!decision.matched.contains(&"service".to_string()));
        assert_eq!(decision.kubernetes_score, 0);
    }

    #[test]
    fn test_case_and_plurals() {
        let decision = classify("two VMs and three IAM Policies");
        assert_eq!(decision.target, Some(IacSpecialist::Terraform));
        assert!(decision.matched.contains(&"vm".to_string()));
        assert!(decision.matched.contains(&"iam policy".to_string()));

        assert_eq!(
            classify("KUBECTL apply for PODS").target,
            Some(IacSpecialist::Kubernetes)
        );
    }

    #[test]
    fn test_word_boundaries() {
        // "vm" inside a word and "pod" inside "podcast" do not count
        let decision = classify("summarize the podcast about vmware");
        assert!(decision.matched.is_empty());
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let decision = classify("bucket bucket bucket");
        assert_eq!(decision.terraform_score, 2);
    }

    #[test]
    fn test_ambiguous() {
        let none = classify("Help me with my homework");
        assert!(none.is_ambiguous());
        assert_eq!(none.terraform_score, 0);
        assert_eq!(none.kubernetes_score, 0);
        assert!(none.summary().contains("nothing"));

        // bucket (2) vs secret (2)
        assert!(classify("a bucket for the secret").is_ambiguous());
    }

    #[test]
    fn test_specialist_names() {
        assert_eq!(IacSpecialist::Terraform.to_string(), "terraform_config_gen");
        assert_eq!(
            "kubectl_manifest_gen".parse::<IacSpecialist>().unwrap(),
            IacSpecialist::Kubernetes
        );
        assert!("helm".parse::<IacSpecialist>().is_err());
    }

    #[test]
    fn test_from_answer() {
        assert_eq!(
            IacSpecialist::from_answer("kubectl_manifest_gen"),
            Some(IacSpecialist::Kubernetes)
        );
        assert_eq!(
            IacSpecialist::from_answer("Route to `terraform_config_gen`."),
            Some(IacSpecialist::Terraform)
        );
        assert_eq!(
            IacSpecialist::from_answer("This is a Kubernetes task"),
            Some(IacSpecialist::Kubernetes)
        );
        assert_eq!(IacSpecialist::from_answer("terraform or kubectl?"), None);
        assert_eq!(IacSpecialist::from_answer("I am not sure"), None);
    }
}
