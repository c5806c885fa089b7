use serde::{Deserialize, Serialize};

/// Tree shape produced by the content generator.
///
/// Carries no ids; any ids the generator emitted are dropped on parse and
/// fresh ones are assigned when the tree is imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateNode {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<CandidateNode>,
}

impl CandidateNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: CandidateNode) -> Self {
        self.children.push(child);
        self
    }
}
