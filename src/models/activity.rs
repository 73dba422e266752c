use serde::Serialize;
use utoipa::ToSchema;

/// Event counts keyed by the fixed set of recognized event kinds.
/// Serialized under the upstream event-type names.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ContributionCounts {
    #[serde(rename = "PushEvent")]
    pub push: u64,
    #[serde(rename = "PullRequestEvent")]
    pub pull_request: u64,
    #[serde(rename = "IssuesEvent")]
    pub issues: u64,
    #[serde(rename = "CreateEvent")]
    pub create: u64,
    #[serde(rename = "WatchEvent")]
    pub watch: u64,
    #[serde(rename = "ForkEvent")]
    pub fork: u64,
    #[serde(rename = "ReleaseEvent")]
    pub release: u64,
    #[serde(rename = "CommitCommentEvent")]
    pub commit_comment: u64,
}

impl ContributionCounts {
    /// Buckets one event by its declared type. Returns false for
    /// unrecognized types, which count toward total_events only.
    pub fn record(&mut self, event_type: &str) -> bool {
        let counter = match event_type {
            "PushEvent" => &mut self.push,
            "PullRequestEvent" => &mut self.pull_request,
            "IssuesEvent" => &mut self.issues,
            "CreateEvent" => &mut self.create,
            "WatchEvent" => &mut self.watch,
            "ForkEvent" => &mut self.fork,
            "ReleaseEvent" => &mut self.release,
            "CommitCommentEvent" => &mut self.commit_comment,
            _ => return false,
        };

        *counter += 1;
        true
    }

    pub fn total(&self) -> u64 {
        self.push
            + self.pull_request
            + self.issues
            + self.create
            + self.watch
            + self.fork
            + self.release
            + self.commit_comment
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyActivity {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivitySummary {
    pub total_events: u64,
    pub contributions_by_type: ContributionCounts,
    /// Trailing 30 calendar days ending today, oldest first. Days with
    /// no events are present with a zero count.
    pub last_30_days: Vec<DailyActivity>,
    pub total_contributions: u64,
}
