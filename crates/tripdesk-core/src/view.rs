//! Top-level views and dashboard tabs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The page currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    HomePage,
    CustomerDashboard,
    AgentDashboard,
}

/// Tabs inside a dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    BookTrip,
    MyTrips,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names() {
        assert_eq!(View::HomePage.to_string(), "home-page");
        assert_eq!(View::AgentDashboard.to_string(), "agent-dashboard");
        assert_eq!(View::default(), View::HomePage);
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("my-trips".parse::<DashboardTab>().unwrap(), DashboardTab::MyTrips);
        assert_eq!("book-trip".parse::<DashboardTab>().unwrap(), DashboardTab::BookTrip);
        assert!("settings".parse::<DashboardTab>().is_err());
    }
}
