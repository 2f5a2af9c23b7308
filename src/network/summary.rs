use serde::Serialize;

use super::CompanyGroup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCount {
    pub name: String,
    pub count: usize,
}

/// Whole-dataset statistics. Unlike the tree, `top_companies` is never
/// truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    pub total_connections: usize,
    pub total_companies: usize,
    pub top_companies: Vec<CompanyCount>,
}

impl NetworkSummary {
    /// `ranked` must already be in rank order.
    pub fn from_ranked(total_connections: usize, ranked: &[CompanyGroup<'_>]) -> Self {
        NetworkSummary {
            total_connections,
            total_companies: ranked.len(),
            top_companies: ranked
                .iter()
                .map(|g| CompanyCount {
                    name: g.name.to_string(),
                    count: g.members.len(),
                })
                .collect(),
        }
    }

    /// First `n` entries of the ranking, or all of them if there are fewer.
    pub fn top(&self, n: usize) -> &[CompanyCount] {
        &self.top_companies[..n.min(self.top_companies.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.total_connections == 0
    }
}
