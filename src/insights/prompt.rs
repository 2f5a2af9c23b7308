use itertools::Itertools;

use crate::contact::Contact;
use crate::network::{group_by_company, rank};
use crate::settings::InsightSettings;

/// Bounds that keep the prompt small regardless of export size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    pub sample_size: usize,
    pub top_companies: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        PromptOptions {
            sample_size: 50,
            top_companies: 10,
        }
    }
}

impl From<&InsightSettings> for PromptOptions {
    fn from(s: &InsightSettings) -> Self {
        PromptOptions {
            sample_size: s.sample_size,
            top_companies: s.top_companies,
        }
    }
}

pub fn top_companies_line(connections: &[Contact], limit: usize) -> String {
    let mut groups = group_by_company(connections);
    rank(&mut groups);
    groups
        .iter()
        .take(limit)
        .map(|g| format!("{} ({})", g.name, g.members.len()))
        .join(", ")
}

pub fn sample_roles_line(connections: &[Contact], limit: usize) -> String {
    connections
        .iter()
        .take(limit)
        .map(|c| format!("{} at {}", c.position, c.company))
        .join(", ")
}

pub fn build_prompt(connections: &[Contact], opts: &PromptOptions) -> String {
    format!(
        "Analyze this professional network data from a contacts export.\n\
         Top Companies: {}\n\
         Sample Roles: {}\n\
         Total Connections: {}\n\
         \n\
         Please provide:\n\
         1. A summary of the network's industry focus.\n\
         2. Potential career opportunities or transitions suggested by this network.\n\
         3. Three specific networking strategies for this user based on their current reach.\n\
         Format the response in clean Markdown.\n",
        top_companies_line(connections, opts.top_companies),
        sample_roles_line(connections, opts.sample_size),
        connections.len(),
    )
}
