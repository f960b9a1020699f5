//! Issue identifiers and the listing URLs derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing page prefix; the issue id is appended as a decimal number.
pub const DEFAULT_BASE_URL: &str = "https://www.jair.org/index.php/jair/issue/view/";

/// Site origin used to absolutize relative article links
pub const DEFAULT_ORIGIN: &str = "https://www.jair.org";

/// First issue id of the harvest range
pub const DEFAULT_START_ISSUE: u32 = 1085;

/// Number of issues harvested by default
pub const DEFAULT_ISSUE_COUNT: u32 = 75;

/// Numeric identifier of one journal issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueReference(pub u32);

impl IssueReference {
    /// Listing page URL for this issue: `base` followed by the decimal id.
    pub fn listing_url(&self, base: &str) -> String {
        format!("{}{}", base, self.0)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for IssueReference {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Contiguous run of issues `[start, start + count - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueRange {
    pub start: u32,
    pub count: u32,
}

impl IssueRange {
    pub fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// Last issue id in the range, `None` when the range is empty
    pub fn last(&self) -> Option<u32> {
        if self.count == 0 {
            None
        } else {
            Some(self.start.saturating_add(self.count - 1))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = IssueReference> {
        let end = self.last();
        let start = self.start;
        end.into_iter()
            .flat_map(move |end| start..=end)
            .map(IssueReference::from)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for IssueRange {
    fn default() -> Self {
        Self::new(DEFAULT_START_ISSUE, DEFAULT_ISSUE_COUNT)
    }
}
