//! Dashboard section state.
//!
//! Each section loads and fails independently. Live data is re-polled while the
//! dashboard is shown, and a failed poll keeps the last good snapshot on
//! screen alongside the error.

use crate::api::{ApiRequest, DashboardSection, SectionSnapshot};
use crate::domain::{CampaignBanner, LiveMetric, Prediction, RegionRanking};

/// Load state of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSlot<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub loading: bool,
}

impl<T> Default for SectionSlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> SectionSlot<T> {
    fn begin(&mut self) {
        self.loading = true;
    }

    fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    fn fail(&mut self, message: &str, keep_last: bool) {
        if !keep_last {
            self.data = None;
        }
        self.error = Some(message.to_string());
        self.loading = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub live_data: SectionSlot<Vec<LiveMetric>>,
    pub predictions: SectionSlot<Vec<Prediction>>,
    pub rankings: SectionSlot<Vec<RegionRanking>>,
    pub banner: SectionSlot<CampaignBanner>,
    started: bool,
}

impl DashboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sections have been requested at least once.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Marks every section loading and returns one request per section.
    pub fn refresh_all(&mut self) -> Vec<ApiRequest> {
        self.started = true;
        DashboardSection::ALL
            .into_iter()
            .map(|section| self.refresh(section))
            .collect()
    }

    /// Marks one section loading and returns its request.
    pub fn refresh(&mut self, section: DashboardSection) -> ApiRequest {
        match section {
            DashboardSection::LiveData => self.live_data.begin(),
            DashboardSection::Predictions => self.predictions.begin(),
            DashboardSection::Rankings => self.rankings.begin(),
            DashboardSection::Banner => self.banner.begin(),
        }
        ApiRequest::load_section(section)
    }

    pub fn apply_snapshot(&mut self, snapshot: SectionSnapshot) {
        match snapshot {
            SectionSnapshot::LiveData(metrics) => self.live_data.succeed(metrics),
            SectionSnapshot::Predictions(predictions) => self.predictions.succeed(predictions),
            SectionSnapshot::Rankings(rankings) => self.rankings.succeed(rankings),
            SectionSnapshot::Banner(banner) => self.banner.succeed(banner),
        }
    }

    pub fn apply_failure(&mut self, section: DashboardSection, message: &str) {
        match section {
            DashboardSection::LiveData => self.live_data.fail(message, true),
            DashboardSection::Predictions => self.predictions.fail(message, false),
            DashboardSection::Rankings => self.rankings.fail(message, false),
            DashboardSection::Banner => self.banner.fail(message, false),
        }
    }
}
