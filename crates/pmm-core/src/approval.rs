use std::collections::HashSet;

/// Tools producing strategic documents that need human sign-off before
/// they are acted on.
const APPROVAL_REQUIRED: &[&str] = &[
    "create_positioning_statement",
    "create_messaging_matrix",
    "create_launch_plan",
];

/// Decides which tool invocations are flagged for human approval when
/// surfaced to the caller.
#[derive(Debug, Clone)]
pub struct ApprovalPolicy {
    gated: HashSet<String>,
}

impl ApprovalPolicy {
    /// Standard policy: strategic planning documents are gated.
    pub fn standard() -> Self {
        Self::from_names(APPROVAL_REQUIRED.iter().copied())
    }

    /// Build a policy from an explicit list of gated tool names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gated: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether an invocation of `name` must be flagged for human approval.
    pub fn requires_approval(&self, name: &str) -> bool {
        self.gated.contains(name)
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_gates_strategic_documents() {
        let policy = ApprovalPolicy::standard();
        assert!(policy.requires_approval("create_positioning_statement"));
        assert!(policy.requires_approval("create_messaging_matrix"));
        assert!(policy.requires_approval("create_launch_plan"));
        assert!(!policy.requires_approval("create_battlecard"));
        assert!(!policy.requires_approval("fetch_url"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = ApprovalPolicy::from_names(["fetch_url"]);
        assert!(policy.requires_approval("fetch_url"));
        assert!(!policy.requires_approval("create_launch_plan"));
    }
}
