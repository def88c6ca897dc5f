use chrono::NaiveDate;
use std::fmt;

/// Wildcard option value meaning "no constraint on this field".
pub const ALL: &str = "ALL";

/// Wildcard as the query API spells it.
pub const WILDCARD: &str = "*";

/// Sentinel the collectors emit where a membership list had no data.
/// Dropped before anything is indexed.
pub const NO_DATA: &str = "nan";

/// Row cap enforced by the remote query service. Surfaced as "possibly
/// truncated" when exactly this many rows come back, never enforced here.
pub const REMOTE_ROW_CAP: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vendor {
    Aws,
    Gcp,
    Azure,
}

impl Vendor {
    pub const EVERY: [Vendor; 3] = [Vendor::Aws, Vendor::Gcp, Vendor::Azure];

    pub fn as_str(self) -> &'static str {
        match self {
            Vendor::Aws => "AWS",
            Vendor::Gcp => "GCP",
            Vendor::Azure => "AZURE",
        }
    }

    /// Table name the query API expects.
    pub fn table_name(self) -> &'static str {
        match self {
            Vendor::Aws => "aws",
            Vendor::Gcp => "gcp",
            Vendor::Azure => "azure",
        }
    }

    /// Only AWS carries per-instance zone membership in its topology.
    pub fn has_zones(self) -> bool {
        matches!(self, Vendor::Aws)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar bounds of a historical query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One edit to the three-level filter. `None` clears the field; the
/// literal "ALL" is the wildcard selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Instance(Option<String>),
    Region(Option<String>),
    Zone(Option<String>),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
}

/// Commands sent from rendering collaborators -> session engine.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Switch the active vendor; resets that vendor's filter session and
    /// loads its latest snapshot if none is held yet.
    SelectVendor(Vendor),
    Edit { vendor: Vendor, edit: FilterEdit },
    /// Validate the current selection and issue the historical query.
    Submit { vendor: Vendor },
    RefreshLatest { vendor: Vendor },
}

/// Commands sent from the session engine -> query exec task.
#[derive(Debug, Clone)]
pub enum QueryCommand {
    History {
        vendor: Vendor,
        params: spotfeed_rs::query::models::HistoryQuery,
        range: DateRange,
        request_id: uuid::Uuid,
    },
    Latest {
        vendor: Vendor,
        request_id: uuid::Uuid,
    },
}

/// Failure conditions surfaced to rendering collaborators as plain data.
///
/// Every one of these is recovered at the boundary where it is detected;
/// none is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveFailure {
    /// Association payload missing or malformed; filters degrade to
    /// wildcard-only option sets.
    TopologyUnavailable(Vendor),
    /// A zone's owning region could not be derived; the zone is only
    /// reachable under the wildcard.
    UnresolvableZone(String),
    /// A required field was empty (or AWS's AZ unset) at submit time.
    InvalidFilterSubmission(String),
    /// Start after end, or the span exceeds what the service allows.
    InvalidDateRange(String),
    /// Transport or server-side failure on a historical/latest fetch.
    /// Previous table state is preserved unchanged.
    RemoteQueryFailure(String),
}

impl fmt::Display for ArchiveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFailure::TopologyUnavailable(v) => {
                write!(f, "association data unavailable for {}", v)
            }
            ArchiveFailure::UnresolvableZone(z) => {
                write!(f, "no region could be derived for zone {}", z)
            }
            ArchiveFailure::InvalidFilterSubmission(msg) => {
                write!(f, "invalid query: {}", msg)
            }
            ArchiveFailure::InvalidDateRange(msg) => {
                write!(f, "invalid date range: {}", msg)
            }
            ArchiveFailure::RemoteQueryFailure(msg) => {
                write!(f, "query failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ArchiveFailure {}
