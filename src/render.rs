use std::fmt;

use crate::network::{NetworkSummary, NetworkTree, NodeRef};

/// Companies shown in the overview by default.
pub const OVERVIEW_TOP: usize = 5;

pub const EMPTY_NETWORK: &str =
    "No connections found. Expected a header row containing \"First Name\".";

/// Totals followed by a compact ranking table.
pub struct Overview<'a> {
    pub summary: &'a NetworkSummary,
    pub top: usize,
}

impl fmt::Display for Overview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Overview")?;
        writeln!(f, "  Connections: {}", self.summary.total_connections)?;
        writeln!(f, "  Companies:   {}", self.summary.total_companies)?;

        let rows = self.summary.top(self.top);
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(f, "\nTop {} Companies", rows.len())?;
        writeln!(f, "{:>3} | {:<32} | {:>5} |", "#", "Company", "Count")?;
        writeln!(f, "{}", "-".repeat(60))?;
        let max = rows.first().map_or(1, |c| c.count.max(1));
        for (i, c) in rows.iter().enumerate() {
            writeln!(
                f,
                "{:>3} | {:<32} | {:>5} | {}",
                i + 1,
                truncate(&c.name, 32),
                c.count,
                "#".repeat((c.count * 12).div_ceil(max))
            )?;
        }
        Ok(())
    }
}

/// Indented outline: root, then "company (n)", then contact names.
pub struct Outline<'a>(pub &'a NetworkTree);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.0;
        writeln!(f, "{}", tree.name)?;
        for (ci, company) in tree.children.iter().enumerate() {
            let (branch, indent) = if ci + 1 == tree.children.len() {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            writeln!(f, "{}{} ({})", branch, company.name, company.children.len())?;
            for (pi, contact) in company.children.iter().enumerate() {
                let leaf = if pi + 1 == company.children.len() {
                    "└── "
                } else {
                    "├── "
                };
                writeln!(f, "{}{}{}", indent, leaf, contact.name)?;
            }
        }
        Ok(())
    }
}

/// Detail card for a selected node.
pub struct Details<'a>(pub NodeRef<'a>);

impl fmt::Display for Details<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        writeln!(f, "{}", node.name())?;
        let Some(info) = node.contact() else {
            writeln!(f, "  {}", node.kind().as_str())?;
            return writeln!(
                f,
                "  {} immediate connections mapped to this node.",
                node.weight()
            );
        };
        if !info.position.is_empty() {
            writeln!(f, "  {}", info.position)?;
        }
        writeln!(f, "  Company:   {}", info.company)?;
        writeln!(f, "  Connected: {}", info.connected_on)?;
        if !info.email.is_empty() {
            writeln!(f, "  Email:     {}", info.email)?;
        }
        if !info.url.is_empty() {
            writeln!(f, "  Profile:   {}", info.url)?;
        }
        Ok(())
    }
}

/// Cut to at most `max` characters, ending in "..." when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
