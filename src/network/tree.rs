use serde::Serialize;

use super::CompanyGroup;
use crate::contact::Contact;

/// Label of the synthetic root node.
pub const ROOT_NAME: &str = "My Network";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "root")]
pub struct NetworkTree {
    pub name: String,
    pub children: Vec<CompanyNode>,
}

/// A company branch. Its weight is the number of contacts under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "company")]
pub struct CompanyNode {
    pub name: String,
    pub children: Vec<ContactNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "contact")]
pub struct ContactNode {
    pub name: String,
    pub info: Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Company,
    Contact,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Company => "company",
            NodeKind::Contact => "contact",
        }
    }
}

/// Borrowed view of any node, handed to selection callbacks and renderers.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a NetworkTree),
    Company(&'a CompanyNode),
    Contact(&'a ContactNode),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Root(n) => &n.name,
            NodeRef::Company(n) => &n.name,
            NodeRef::Contact(n) => &n.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Root(_) => NodeKind::Root,
            NodeRef::Company(_) => NodeKind::Company,
            NodeRef::Contact(_) => NodeKind::Contact,
        }
    }

    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Root(n) => n.children.iter().map(NodeRef::Company).collect(),
            NodeRef::Company(n) => n.children.iter().map(NodeRef::Contact).collect(),
            NodeRef::Contact(_) => Vec::new(),
        }
    }

    /// Number of immediate children.
    pub fn weight(&self) -> usize {
        match self {
            NodeRef::Root(n) => n.children.len(),
            NodeRef::Company(n) => n.children.len(),
            NodeRef::Contact(_) => 0,
        }
    }

    pub fn contact(&self) -> Option<&'a Contact> {
        match self {
            NodeRef::Contact(n) => Some(&n.info),
            _ => None,
        }
    }
}

impl NetworkTree {
    /// Keep the first `limit` groups of `ranked`. Contacts stay in file order.
    pub fn from_ranked(ranked: &[CompanyGroup<'_>], limit: usize) -> Self {
        let children = ranked
            .iter()
            .take(limit)
            .map(|group| CompanyNode {
                name: group.name.to_string(),
                children: group
                    .members
                    .iter()
                    .map(|c| ContactNode {
                        name: c.display_name(),
                        info: (*c).clone(),
                    })
                    .collect(),
            })
            .collect();
        NetworkTree {
            name: ROOT_NAME.to_string(),
            children,
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Root(self)
    }

    /// Every node, depth first, root first.
    pub fn walk(&self) -> Vec<NodeRef<'_>> {
        let mut out = Vec::with_capacity(1 + self.children.len() + self.contact_count());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().into_iter().rev());
        }
        out
    }

    /// Contacts retained under the kept companies.
    pub fn contact_count(&self) -> usize {
        self.children.iter().map(|c| c.children.len()).sum()
    }

    /// Exact, case-sensitive match on the company string.
    pub fn find_company(&self, name: &str) -> Option<NodeRef<'_>> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .map(NodeRef::Company)
    }

    /// First contact under `company` whose display name is `name`.
    pub fn find_contact(&self, company: &str, name: &str) -> Option<NodeRef<'_>> {
        self.children
            .iter()
            .find(|c| c.name == company)?
            .children
            .iter()
            .find(|c| c.name == name)
            .map(NodeRef::Contact)
    }
}
