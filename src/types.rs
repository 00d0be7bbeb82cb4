use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineRecord {
    pub title: String,
    #[serde(rename = "due_date", serialize_with = "serialize_rfc3339")]
    pub due_timestamp: DateTime<Utc>,
    /// Time of day as it appeared on the page, empty when none matched.
    #[serde(rename = "due_time")]
    pub due_time_display: String,
    /// `dd-mm-yyyy HH:MM:SS`
    pub due_date_display: String,
    pub days_remaining: i64,
}

fn serialize_rfc3339<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub index: usize,
    pub year: String,
    pub ecp_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferingsResponse {
    pub offerings: Vec<Offering>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeadlinesRequest {
    #[serde(default)]
    pub ecp_url: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlinesResponse {
    pub deadlines: Vec<DeadlineRecord>,
    pub course_code: Option<String>,
}
