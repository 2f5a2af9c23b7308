use tracing::info;

use crate::network::{Network, PipelineOptions};

/// Caller-owned holder for the current upload. Every load replaces the
/// previous network wholesale; nothing is merged or kept across loads.
#[derive(Debug, Default)]
pub struct Workspace {
    options: PipelineOptions,
    network: Option<Network>,
    insights: Option<String>,
}

impl Workspace {
    pub fn new(options: PipelineOptions) -> Self {
        Workspace {
            options,
            network: None,
            insights: None,
        }
    }

    pub fn load(&mut self, text: &str) -> &Network {
        self.insights = None;
        self.network.insert(Network::from_csv(text, &self.options))
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    /// True when nothing is loaded or the last load found no connections.
    pub fn is_empty(&self) -> bool {
        self.network.as_ref().map_or(true, Network::is_empty)
    }

    pub fn set_insights(&mut self, text: String) {
        self.insights = Some(text);
    }

    pub fn insights(&self) -> Option<&str> {
        self.insights.as_deref()
    }

    /// Discard the network and any insight text.
    pub fn clear(&mut self) {
        if self.network.take().is_some() {
            info!("Cleared loaded network");
        }
        self.insights = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "First Name,Last Name,Company\nAna,Lee,Acme\nBo,Kim,Acme\n";
    const B: &str = "First Name,Last Name,Company\nCy,Wu,Globex\n";

    #[test]
    fn load_replaces_previous() {
        let mut ws = Workspace::default();
        assert!(ws.is_empty());
        assert_eq!(ws.load(A).summary.total_connections, 2);
        ws.set_insights("text".into());

        let net = ws.load(B);
        assert_eq!(net.summary.total_connections, 1);
        assert_eq!(net.summary.top_companies[0].name, "Globex");
        assert!(ws.insights().is_none());
    }

    #[test]
    fn clear_discards_everything() {
        let mut ws = Workspace::default();
        ws.load(A);
        ws.set_insights("text".into());
        ws.clear();
        assert!(ws.network().is_none());
        assert!(ws.insights().is_none());
        assert!(ws.is_empty());
    }

    #[test]
    fn headerless_upload_is_empty_but_loaded() {
        let mut ws = Workspace::default();
        ws.load("nothing useful here");
        assert!(ws.network().is_some());
        assert!(ws.is_empty());
    }
}
