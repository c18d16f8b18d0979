use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted travel plan row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub destination: Option<String>,
    pub people: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: i32,
    pub budget: Option<f64>,
    /// JSON-encoded list of preference tags, `"[]"` when none were given.
    pub preferences: String,
    /// JSON snapshot of the full itinerary, written after the plan commits.
    pub plan_data: Option<String>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted spot row, ordered within its day by `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TravelSpot {
    pub id: i64,
    pub plan_id: i64,
    pub day: i32,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub spot_type: Option<String>,
    pub description: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A save request after normalization. Absent fields stay `None` so the
/// store can apply its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanRequest {
    pub plan_name: String,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_count: Option<i32>,
    pub budget: Option<f64>,
    pub party_size: Option<i32>,
    pub preferences: Vec<String>,
    pub days: Vec<PlanDay>,
}

/// One day of an itinerary, as exchanged with clients and the AI planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    #[serde(default)]
    pub day: i32,
    #[serde(default)]
    pub spots: Vec<Spot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub spot_type: String,
}

/// Outcome of saving a plan. The relational rows always commit together;
/// the denormalized snapshot is written afterwards and may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedPlan {
    Complete { plan_id: i64 },
    WithoutSnapshot { plan_id: i64 },
}

impl SavedPlan {
    pub fn plan_id(&self) -> i64 {
        match *self {
            SavedPlan::Complete { plan_id } | SavedPlan::WithoutSnapshot { plan_id } => plan_id,
        }
    }
}
