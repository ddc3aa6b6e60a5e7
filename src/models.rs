use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    pub count: u64,
}

impl ContributionDay {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// What the data source hands back for one handle.
#[derive(Debug, Clone, Default)]
pub struct ContributionHistory {
    pub contributions: Vec<ContributionDay>,
    pub total_last_year: u64,
}

/// Upstream JSON document. Unknown fields (`level`, per-year totals) are ignored.
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    pub contributions: Vec<ContributionDay>,
    pub total: UpstreamTotal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTotal {
    pub last_year: u64,
}

impl From<UpstreamResponse> for ContributionHistory {
    fn from(raw: UpstreamResponse) -> Self {
        Self {
            contributions: raw.contributions,
            total_last_year: raw.total.last_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub username: String,
    pub today: u64,
    pub streak: u32,
    pub stage: u8,
    pub total_last_year: u64,
    pub recent: Vec<ContributionDay>,
    pub as_of: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub weekday: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct GardenResponse {
    #[serde(flatten)]
    pub summary: ActivitySummary,
    pub stage_name: &'static str,
    pub message: &'static str,
    pub theme: &'static str,
    pub chart: Vec<ChartPoint>,
    pub share_url: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub user: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ThemeQuery {
    pub theme: Option<String>,
}
