pub mod summary;
pub mod tree;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::contact::Contact;
use crate::parser::{parse_connections, TokenizerPolicy};
pub use summary::{CompanyCount, NetworkSummary};
pub use tree::{CompanyNode, ContactNode, NetworkTree, NodeKind, NodeRef, ROOT_NAME};

/// Company branches kept in the tree unless configured otherwise.
pub const DEFAULT_TREE_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub tree_limit: usize,
    pub tokenizer: TokenizerPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            tree_limit: DEFAULT_TREE_LIMIT,
            tokenizer: TokenizerPolicy::default(),
        }
    }
}

/// Contacts sharing one exact company string, in file order.
#[derive(Debug, Clone)]
pub struct CompanyGroup<'a> {
    pub name: &'a str,
    pub members: Vec<&'a Contact>,
}

/// Group by exact company string. Groups come out in order of first
/// appearance.
pub fn group_by_company(contacts: &[Contact]) -> Vec<CompanyGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CompanyGroup<'_>> = Vec::new();
    for contact in contacts {
        let slot = *index.entry(contact.company.as_str()).or_insert_with(|| {
            groups.push(CompanyGroup {
                name: &contact.company,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(contact);
    }
    groups
}

/// Largest group first. The sort is stable, so equal sizes keep
/// first-appearance order.
pub fn rank(groups: &mut [CompanyGroup<'_>]) {
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
}

/// Build the tree and the summary from one grouping pass.
pub fn aggregate(contacts: &[Contact], tree_limit: usize) -> (NetworkTree, NetworkSummary) {
    let mut groups = group_by_company(contacts);
    rank(&mut groups);

    let summary = NetworkSummary::from_ranked(contacts.len(), &groups);
    let tree = NetworkTree::from_ranked(&groups, tree_limit);

    if groups.len() > tree_limit {
        debug!(
            companies = groups.len(),
            kept = tree_limit,
            "Truncated tree to top companies"
        );
    }
    (tree, summary)
}

/// Result of one run of the pipeline. Rebuilt from scratch for every input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub connections: Vec<Contact>,
    pub tree: NetworkTree,
    pub summary: NetworkSummary,
}

impl Network {
    pub fn from_csv(text: &str, opts: &PipelineOptions) -> Self {
        let contacts = parse_connections(text, opts.tokenizer);
        Self::from_contacts(contacts, opts.tree_limit)
    }

    pub fn from_contacts(connections: Vec<Contact>, tree_limit: usize) -> Self {
        let (tree, summary) = aggregate(&connections, tree_limit);
        info!(
            connections = summary.total_connections,
            companies = summary.total_companies,
            branches = tree.children.len(),
            "Built network"
        );
        Network {
            connections,
            tree,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "First Name,Last Name,Company,Position\n\
                           Ana,Lee,Acme,Engineer\n\
                           Bo,Kim,Acme,Manager\n\
                           Cy,Wu,Globex,Analyst\n";

    fn counts(summary: &NetworkSummary) -> Vec<(&str, usize)> {
        summary
            .top_companies
            .iter()
            .map(|c| (c.name.as_str(), c.count))
            .collect()
    }

    fn contact(first: &str, company: &str) -> Contact {
        Contact {
            first_name: first.to_string(),
            last_name: "X".to_string(),
            company: company.to_string(),
            ..Default::default()
        }
    }

    /// Company `i` gets `i % 4 + 1` members, interleaved.
    fn synthetic(companies: usize) -> Vec<Contact> {
        let mut out = Vec::new();
        for round in 0..4 {
            for i in 0..companies {
                if round <= i % 4 {
                    out.push(contact(&format!("p{}_{}", i, round), &format!("Co{:03}", i)));
                }
            }
        }
        out
    }

    #[test]
    fn end_to_end_example() {
        let net = Network::from_csv(EXAMPLE, &PipelineOptions::default());
        assert_eq!(net.summary.total_connections, 3);
        assert_eq!(net.summary.total_companies, 2);
        assert_eq!(counts(&net.summary), vec![("Acme", 2), ("Globex", 1)]);

        assert_eq!(net.tree.name, ROOT_NAME);
        assert_eq!(net.tree.children.len(), 2);
        let acme = &net.tree.children[0];
        assert_eq!(acme.name, "Acme");
        let names: Vec<&str> = acme.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Lee", "Bo Kim"]);
        let globex = &net.tree.children[1];
        assert_eq!(globex.name, "Globex");
        assert_eq!(globex.children[0].name, "Cy Wu");
        assert_eq!(globex.children[0].info.position, "Analyst");
    }

    #[test]
    fn companyless_row_excluded_everywhere() {
        let text = format!("{}Dee,Ray,,Intern\n", EXAMPLE);
        let net = Network::from_csv(&text, &PipelineOptions::default());
        assert_eq!(net.summary.total_connections, 3);
        assert_eq!(net.summary.total_companies, 2);
        assert_eq!(net.tree.contact_count(), 3);
        assert!(net.tree.walk().iter().all(|n| n.name() != "Dee Ray"));
    }

    #[test]
    fn missing_header_gives_zeroes() {
        let net = Network::from_csv("Name,Company\nAna,Acme\n", &PipelineOptions::default());
        assert!(net.is_empty());
        assert_eq!(net.summary.total_connections, 0);
        assert_eq!(net.summary.total_companies, 0);
        assert!(net.summary.top_companies.is_empty());
        assert!(net.tree.children.is_empty());
        assert_eq!(net.tree.name, ROOT_NAME);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let contacts = vec![
            contact("a", "Zeta"),
            contact("b", "Alpha"),
            contact("c", "Mid"),
            contact("d", "Alpha"),
            contact("e", "Zeta"),
            contact("f", "Mid"),
        ];
        let (tree, summary) = aggregate(&contacts, 50);
        assert_eq!(counts(&summary), vec![("Zeta", 2), ("Alpha", 2), ("Mid", 2)]);
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn members_keep_input_order() {
        let contacts = vec![
            contact("z", "Acme"),
            contact("y", "Other"),
            contact("a", "Acme"),
            contact("m", "Acme"),
        ];
        let (tree, _) = aggregate(&contacts, 50);
        let firsts: Vec<&str> = tree.children[0]
            .children
            .iter()
            .map(|c| c.info.first_name.as_str())
            .collect();
        assert_eq!(firsts, vec!["z", "a", "m"]);
    }

    #[test]
    fn company_strings_are_not_normalized() {
        let contacts = vec![
            contact("a", "Acme"),
            contact("b", "acme"),
            contact("c", "Acme "),
        ];
        let (tree, summary) = aggregate(&contacts, 50);
        assert_eq!(summary.total_companies, 3);
        for company in &tree.children {
            assert!(company.children.iter().all(|c| c.info.company == company.name));
        }
    }

    #[test]
    fn truncation_caps_tree_not_summary() {
        let contacts = synthetic(70);
        for limit in [0, 1, 10, 50, 69, 70, 71, 200] {
            let (tree, summary) = aggregate(&contacts, limit);
            assert_eq!(tree.children.len(), limit.min(70), "limit {}", limit);
            assert_eq!(summary.total_companies, 70);
            assert_eq!(summary.total_connections, contacts.len());
            assert_eq!(summary.top_companies.len(), 70);
        }
    }

    #[test]
    fn tree_is_prefix_of_summary() {
        let contacts = synthetic(65);
        let (tree, summary) = aggregate(&contacts, DEFAULT_TREE_LIMIT);
        assert_eq!(tree.children.len(), DEFAULT_TREE_LIMIT);
        for (node, ranked) in tree.children.iter().zip(&summary.top_companies) {
            assert_eq!(node.name, ranked.name);
            assert_eq!(node.children.len(), ranked.count);
        }
        let counts: Vec<usize> = summary.top_companies.iter().map(|c| c.count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        // Co003 is the first company with 4 members.
        assert_eq!(summary.top_companies[0].name, "Co003");
    }

    #[test]
    fn total_is_independent_of_limit() {
        let contacts = synthetic(30);
        let (_, a) = aggregate(&contacts, 1);
        let (_, b) = aggregate(&contacts, 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let text = std::fs::read_to_string("tests/fixtures/connections.csv").unwrap();
        let opts = PipelineOptions::default();
        assert_eq!(Network::from_csv(&text, &opts), Network::from_csv(&text, &opts));
    }

    #[test]
    fn fixture_ranking() {
        let text = std::fs::read_to_string("tests/fixtures/connections.csv").unwrap();
        let net = Network::from_csv(&text, &PipelineOptions::default());
        assert_eq!(net.summary.total_connections, 9);
        assert_eq!(
            counts(&net.summary),
            vec![
                ("Acme Corp", 3),
                ("Globex", 2),
                ("Initech, LLC", 2),
                ("Umbrella", 1),
                ("Hooli", 1),
            ]
        );
        let opts = PipelineOptions {
            tree_limit: 2,
            ..Default::default()
        };
        let net = Network::from_csv(&text, &opts);
        let names: Vec<&str> = net.tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Globex"]);
        assert_eq!(net.summary.total_companies, 5);
    }

    #[test]
    fn summary_top_slice() {
        let net = Network::from_csv(EXAMPLE, &PipelineOptions::default());
        assert_eq!(net.summary.top(5).len(), 2);
        assert_eq!(net.summary.top(1)[0].name, "Acme");
        assert!(net.summary.top(0).is_empty());
    }
}
