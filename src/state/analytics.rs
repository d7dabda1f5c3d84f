//! Operations-dashboard state fed by REST loads and the live feed.

#[cfg(test)]
#[path = "analytics_state_test.rs"]
mod analytics_state_test;

use crate::net::types::{HourPoint, IssueRow, LiveRow, PaymentSplit, RevenuePoint, Summary, TopDriver};

/// Live rows kept on screen. Older rows fall off the bottom.
pub const LIVE_ROWS_MAX: usize = 40;
/// Issue rows kept on screen.
pub const ISSUES_MAX: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    Closed,
    Connecting,
    Open,
}

impl FeedStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "offline",
            Self::Connecting => "connecting",
            Self::Open => "live",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsState {
    pub summary: Summary,
    pub rides_per_hour: Vec<HourPoint>,
    pub revenue_daily: Vec<RevenuePoint>,
    pub payment_split: PaymentSplit,
    pub top_drivers: Vec<TopDriver>,
    pub issues: Vec<IssueRow>,
    pub live: Vec<LiveRow>,
    pub feed_status: FeedStatus,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalyticsState {
    /// Prepend a live row, replacing any previous row for the same
    /// ride/rental, bounded at `LIVE_ROWS_MAX`.
    pub fn push_live(&mut self, row: LiveRow) {
        self.live.retain(|r| !(r.id == row.id && r.kind == row.kind));
        self.live.insert(0, row);
        self.live.truncate(LIVE_ROWS_MAX);
    }

    /// Prepend an issue row, bounded at `ISSUES_MAX`.
    pub fn push_issue(&mut self, row: IssueRow) {
        self.issues.insert(0, row);
        self.issues.truncate(ISSUES_MAX);
    }
}
