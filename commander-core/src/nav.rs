use serde::{Deserialize, Serialize};

/// The three navigable views plus the incident board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    Demo,
    Architecture,
    Incidents,
}

impl Page {
    pub const NAV: [Page; 4] = [Page::Home, Page::Demo, Page::Architecture, Page::Incidents];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Demo => "/demo",
            Page::Architecture => "/architecture",
            Page::Incidents => "/incidents",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Demo => "Demo",
            Page::Architecture => "Architecture",
            Page::Incidents => "Incidents",
        }
    }
}

pub const SITE_TITLE: &str = "Elastic Incident Commander";
pub const REPOSITORY_URL: &str = "https://github.com/mgnlia/elastic-incident-commander";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_lists_pages_in_header_order() {
        let paths: Vec<_> = Page::NAV.iter().map(|p| p.path()).collect();
        assert_eq!(paths, vec!["/", "/demo", "/architecture", "/incidents"]);
        let labels: Vec<_> = Page::NAV.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Home", "Demo", "Architecture", "Incidents"]);
    }
}
