//! Tolerant decoding of incoming plan payloads.
//!
//! Several generations of the frontend have shipped slightly different
//! save-plan bodies: key names changed, and numeric fields arrive as
//! strings as often as numbers. Everything is folded into one
//! [`PlanRequest`] here. Whatever cannot be read is recorded as a
//! [`FieldIssue`] and skipped; normalization itself never fails.

use std::fmt;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::models::plan::{PlanDay, PlanRequest, Spot};

/// Accepted spellings for each logical field, oldest client format first.
const PLAN_NAME_KEYS: &[&str] = &["title", "planName"];
const DESTINATION_KEYS: &[&str] = &["destination"];
const START_DATE_KEYS: &[&str] = &["startDate"];
const END_DATE_KEYS: &[&str] = &["endDate"];
const DAY_COUNT_KEYS: &[&str] = &["days", "dayCount"];
const BUDGET_KEYS: &[&str] = &["budget"];
const PARTY_SIZE_KEYS: &[&str] = &["people", "partySize"];
const PREFERENCES_KEYS: &[&str] = &["preferences"];
const ITINERARY_KEYS: &[&str] = &["plan", "itinerary"];

/// A field that was present but could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl FieldIssue {
    fn new(field: &'static str, value: String, reason: &'static str) -> Self {
        Self { field, value, reason }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}: {}", self.field, self.reason)
        } else {
            write!(f, "{}: {} (got {:?})", self.field, self.reason, self.value)
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizedPlan {
    pub request: PlanRequest,
    pub issues: Vec<FieldIssue>,
}

/// Fold a raw JSON payload into a [`PlanRequest`].
///
/// Absent and null fields stay at their defaults. Malformed values are
/// dropped and reported in `issues`, never escalated to an error.
pub fn normalize(payload: &Map<String, Value>) -> NormalizedPlan {
    let mut issues = Vec::new();

    let request = PlanRequest {
        plan_name: take_string(payload, PLAN_NAME_KEYS).unwrap_or_default(),
        destination: take_string(payload, DESTINATION_KEYS),
        start_date: take_date(payload, START_DATE_KEYS, &mut issues),
        end_date: take_date(payload, END_DATE_KEYS, &mut issues),
        day_count: take_int(payload, DAY_COUNT_KEYS, &mut issues),
        budget: take_decimal(payload, BUDGET_KEYS, &mut issues),
        party_size: take_int(payload, PARTY_SIZE_KEYS, &mut issues),
        preferences: take_string_list(payload, PREFERENCES_KEYS, &mut issues),
        days: take_days(payload, ITINERARY_KEYS, &mut issues),
    };

    NormalizedPlan { request, issues }
}

/// First alias present in the payload wins. Null counts as absent.
fn resolve<'a>(
    payload: &'a Map<String, Value>,
    keys: &'static [&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| payload.get(*key).filter(|v| !v.is_null()).map(|v| (*key, v)))
}

/// Render a scalar the way the client wrote it: strings verbatim,
/// everything else through its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn take_string(payload: &Map<String, Value>, keys: &'static [&'static str]) -> Option<String> {
    resolve(payload, keys).map(|(_, value)| render(value))
}

fn take_int(
    payload: &Map<String, Value>,
    keys: &'static [&'static str],
    issues: &mut Vec<FieldIssue>,
) -> Option<i32> {
    resolve(payload, keys).and_then(|(key, value)| parse_int(key, value, issues))
}

fn take_decimal(
    payload: &Map<String, Value>,
    keys: &'static [&'static str],
    issues: &mut Vec<FieldIssue>,
) -> Option<f64> {
    resolve(payload, keys).and_then(|(key, value)| parse_decimal(key, value, issues))
}

fn take_date(
    payload: &Map<String, Value>,
    keys: &'static [&'static str],
    issues: &mut Vec<FieldIssue>,
) -> Option<NaiveDate> {
    let (key, value) = resolve(payload, keys)?;
    let raw = render(value);
    match parse_date(&raw) {
        Some(date) => Some(date),
        None => {
            issues.push(FieldIssue::new(key, raw, "expected an ISO date"));
            None
        }
    }
}

fn parse_int(key: &'static str, value: &Value, issues: &mut Vec<FieldIssue>) -> Option<i32> {
    let raw = render(value);
    match raw.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.push(FieldIssue::new(key, raw, "expected an integer"));
            None
        }
    }
}

fn parse_decimal(key: &'static str, value: &Value, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let raw = render(value);
    match raw.parse::<f64>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.push(FieldIssue::new(key, raw, "expected a number"));
            None
        }
    }
}

/// Dates arrive as `YYYY-MM-DD` or as a full ISO timestamp; only the
/// calendar day is kept.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day_part = if raw.contains('T') { raw.get(..10)? } else { raw };
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

fn take_string_list(
    payload: &Map<String, Value>,
    keys: &'static [&'static str],
    issues: &mut Vec<FieldIssue>,
) -> Vec<String> {
    let Some((key, value)) = resolve(payload, keys) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        issues.push(FieldIssue::new(key, render(value), "expected a list"));
        return Vec::new();
    };
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                issues.push(FieldIssue::new(key, item.to_string(), "expected a plain value"));
            }
            other => list.push(render(other)),
        }
    }
    list
}

fn take_days(
    payload: &Map<String, Value>,
    keys: &'static [&'static str],
    issues: &mut Vec<FieldIssue>,
) -> Vec<PlanDay> {
    let Some((key, value)) = resolve(payload, keys) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        issues.push(FieldIssue::new(key, render(value), "expected a list of days"));
        return Vec::new();
    };
    let mut days = Vec::with_capacity(items.len());
    for item in items {
        match item.as_object() {
            Some(entry) => days.push(read_day(entry, issues)),
            None => issues.push(FieldIssue::new(key, item.to_string(), "expected a day object")),
        }
    }
    days
}

fn read_day(entry: &Map<String, Value>, issues: &mut Vec<FieldIssue>) -> PlanDay {
    let day = match entry.get("day").filter(|v| !v.is_null()) {
        Some(value) => parse_int("day", value, issues).unwrap_or(0),
        None => {
            issues.push(FieldIssue::new("day", String::new(), "day number missing"));
            0
        }
    };

    let spots = match entry.get("spots").filter(|v| !v.is_null()) {
        Some(value) => match value.as_array() {
            Some(items) => {
                let mut spots = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_object() {
                        Some(spot) => spots.push(read_spot(spot, issues)),
                        None => issues.push(FieldIssue::new(
                            "spots",
                            item.to_string(),
                            "expected a spot object",
                        )),
                    }
                }
                spots
            }
            None => {
                issues.push(FieldIssue::new("spots", render(value), "expected a list of spots"));
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    PlanDay {
        day,
        spots,
        accommodation: entry.get("accommodation").filter(|v| !v.is_null()).map(render),
        notes: entry.get("notes").filter(|v| !v.is_null()).map(render),
    }
}

fn read_spot(entry: &Map<String, Value>, issues: &mut Vec<FieldIssue>) -> Spot {
    Spot {
        name: entry.get("name").filter(|v| !v.is_null()).map(render).unwrap_or_default(),
        lng: coordinate(entry, "lng", issues),
        lat: coordinate(entry, "lat", issues),
        description: entry
            .get("description")
            .filter(|v| !v.is_null())
            .map(render)
            .unwrap_or_default(),
        spot_type: entry.get("type").filter(|v| !v.is_null()).map(render).unwrap_or_default(),
    }
}

fn coordinate(entry: &Map<String, Value>, field: &'static str, issues: &mut Vec<FieldIssue>) -> f64 {
    match entry.get(field).filter(|v| !v.is_null()) {
        Some(value) => parse_decimal(field, value, issues).unwrap_or(0.0),
        None => 0.0,
    }
}
