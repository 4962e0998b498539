use std::{fmt, str::FromStr};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// How posts of a subreddit are ranked for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortingOption {
    Controversial,
    Gilded,
    Hot,
    New,
    RandomRising,
    Rising,
    Top,
}

impl SortingOption {
    pub const ALL: [SortingOption; 7] = [
        SortingOption::Controversial,
        SortingOption::Gilded,
        SortingOption::Hot,
        SortingOption::New,
        SortingOption::RandomRising,
        SortingOption::Rising,
        SortingOption::Top,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortingOption::Controversial => "controversial",
            SortingOption::Gilded => "gilded",
            SortingOption::Hot => "hot",
            SortingOption::New => "new",
            SortingOption::RandomRising => "random_rising",
            SortingOption::Rising => "rising",
            SortingOption::Top => "top",
        }
    }

    /// Text used for `{sorting}` in header templates.
    pub fn label(&self) -> &'static str {
        match self {
            SortingOption::Controversial => "Most Controversial",
            SortingOption::Gilded => "Most Awarded",
            SortingOption::Hot => "Hottest",
            SortingOption::New => "Newest",
            SortingOption::RandomRising => "Randomly Selected Rising",
            SortingOption::Rising => "Rising",
            SortingOption::Top => "Top",
        }
    }

    /// Whether this ranking is bounded by a time filter.
    pub fn uses_time_filter(&self) -> bool {
        matches!(self, SortingOption::Controversial | SortingOption::Top)
    }

    pub fn contains(raw: &str) -> bool {
        raw.parse::<Self>().is_ok()
    }
}

impl FromStr for SortingOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| Error::InvalidSortMode(s.to_string()))
    }
}

impl fmt::Display for SortingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Historical window applied to controversial and top listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFilterOption {
    All,
    Day,
    Hour,
    Month,
    Week,
    Year,
}

impl TimeFilterOption {
    pub const ALL: [TimeFilterOption; 6] = [
        TimeFilterOption::All,
        TimeFilterOption::Day,
        TimeFilterOption::Hour,
        TimeFilterOption::Month,
        TimeFilterOption::Week,
        TimeFilterOption::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilterOption::All => "all",
            TimeFilterOption::Day => "day",
            TimeFilterOption::Hour => "hour",
            TimeFilterOption::Month => "month",
            TimeFilterOption::Week => "week",
            TimeFilterOption::Year => "year",
        }
    }

    /// Text used for `{time}` in header templates.
    pub fn label(&self) -> &'static str {
        match self {
            TimeFilterOption::Hour => "the Past Hour",
            TimeFilterOption::Day => "the Last Day",
            TimeFilterOption::Week => "the Last Week",
            TimeFilterOption::Month => "Last Month",
            TimeFilterOption::Year => "Last Year",
            TimeFilterOption::All => "All Time",
        }
    }

    pub fn contains(raw: &str) -> bool {
        raw.parse::<Self>().is_ok()
    }
}

impl FromStr for TimeFilterOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| Error::InvalidTimeRangeMode(s.to_string()))
    }
}

impl fmt::Display for TimeFilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn get_post_sorting_option(post_sorting: &str) -> Result<SortingOption, Error> {
    post_sorting.parse()
}

pub fn get_time_filter_option(time_filter: &str) -> Result<TimeFilterOption, Error> {
    time_filter.parse()
}

/// A single post as returned by a listing.
///
/// Fields are kept exactly as Reddit sends them so any attribute can be
/// referenced from an output template (`title`, `author`, `selftext`,
/// `score`, `url`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    /// Builds a submission from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the named field as text, `None` when the post has no such field.
    ///
    /// Strings are returned verbatim, `null` as an empty string and every
    /// other value as its compact JSON form.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn title(&self) -> Option<String> {
        self.field("title")
    }
}

/// Reddit API credentials.
///
/// `username` and `password` are only set for the legacy full-auth mode; the
/// read-only application flow needs just the first three fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn has_user_auth(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful `/api/v1/access_token` call.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A listing page: `{"kind": "Listing", "data": {"children": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thing {
    pub data: Submission,
}

/// Partial `/api/v1/me` response, enough to confirm who is logged in.
#[derive(Debug, Clone, Deserialize)]
pub struct Me {
    pub name: String,
}
