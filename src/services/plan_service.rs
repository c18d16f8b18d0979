//! Relational storage for travel plans and their spots.
//!
//! A plan and its spot rows commit in one transaction. The denormalized
//! itinerary snapshot on the plan row is written afterwards, outside the
//! transaction, and is allowed to fail without losing the plan.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::Result;
use crate::models::plan::{PlanDay, PlanRequest, SavedPlan, TravelPlan, TravelSpot};

/// Title used when a request arrives without one.
const DEFAULT_TITLE: &str = "Untitled Trip";
/// Status assigned to newly created plans.
const STATUS_ACTIVE: i32 = 1;

#[derive(Clone)]
pub struct PlanService {
    pool: SqlitePool,
}

impl PlanService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a normalized plan request for `user_id`.
    ///
    /// The plan row and every spot row are inserted in a single
    /// transaction; any insert failure rolls all of it back. The snapshot
    /// update runs after the commit and only downgrades the outcome to
    /// [`SavedPlan::WithoutSnapshot`] when it fails.
    pub async fn save_plan(&self, user_id: i64, request: &PlanRequest) -> Result<SavedPlan> {
        let now = Utc::now();
        let title = if request.plan_name.is_empty() {
            DEFAULT_TITLE
        } else {
            request.plan_name.as_str()
        };
        let preferences = serde_json::to_string(&request.preferences)?;

        let mut tx = self.pool.begin().await?;

        let plan_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO plan (user_id, title, destination, people, start_date, end_date,
                              days, budget, preferences, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(&request.destination)
        .bind(request.party_size.unwrap_or(1))
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.day_count.unwrap_or(1))
        .bind(request.budget)
        .bind(&preferences)
        .bind(STATUS_ACTIVE)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for day in &request.days {
            // Visit order within a day is the client's ordering, numbered from 1.
            for (index, spot) in day.spots.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO spot (plan_id, day, name, lng, lat, type, description,
                                      order_index, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(plan_id)
                .bind(day.day)
                .bind(&spot.name)
                .bind(spot.lng)
                .bind(spot.lat)
                .bind(&spot.spot_type)
                .bind(&spot.description)
                .bind(index as i32 + 1)
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        log::info!(
            "saved plan {} for user {} ({} day(s))",
            plan_id,
            user_id,
            request.days.len()
        );

        match self.write_snapshot(plan_id, &request.days).await {
            Ok(()) => Ok(SavedPlan::Complete { plan_id }),
            Err(err) => {
                log::warn!("plan {} saved, but its itinerary snapshot was not: {}", plan_id, err);
                Ok(SavedPlan::WithoutSnapshot { plan_id })
            }
        }
    }

    async fn write_snapshot(&self, plan_id: i64, days: &[PlanDay]) -> Result<()> {
        let snapshot = serde_json::to_string(days)?;
        sqlx::query("UPDATE plan SET plan_data = ? WHERE id = ?")
            .bind(&snapshot)
            .bind(plan_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All plans belonging to a user, newest first.
    pub async fn list_plans(&self, user_id: i64) -> Result<Vec<TravelPlan>> {
        let plans = sqlx::query_as::<_, TravelPlan>(
            "SELECT * FROM plan WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(plans)
    }

    /// Search a user's plans. Filters that are `None` are left out of the
    /// query entirely; the rest are combined with AND.
    pub async fn search_plans(
        &self,
        user_id: i64,
        plan_name: Option<&str>,
        preferences: Option<&str>,
        budget_min: Option<f64>,
        budget_max: Option<f64>,
    ) -> Result<Vec<TravelPlan>> {
        let mut sql = String::from("SELECT * FROM plan WHERE user_id = ?");
        if plan_name.is_some() {
            sql.push_str(" AND title LIKE ?");
        }
        if preferences.is_some() {
            sql.push_str(" AND preferences LIKE ?");
        }
        if budget_min.is_some() {
            sql.push_str(" AND budget >= ?");
        }
        if budget_max.is_some() {
            sql.push_str(" AND budget <= ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, TravelPlan>(&sql).bind(user_id);
        if let Some(name) = plan_name {
            query = query.bind(format!("%{}%", name));
        }
        if let Some(tag) = preferences {
            query = query.bind(format!("%{}%", tag));
        }
        if let Some(min) = budget_min {
            query = query.bind(min);
        }
        if let Some(max) = budget_max {
            query = query.bind(max);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Spots of a plan, ordered for itinerary reconstruction.
    pub async fn spots_for_plan(&self, plan_id: i64) -> Result<Vec<TravelSpot>> {
        let spots = sqlx::query_as::<_, TravelSpot>(
            "SELECT * FROM spot WHERE plan_id = ? ORDER BY day, order_index",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(spots)
    }

    /// Spots of one day of a plan, in visit order.
    pub async fn spots_for_day(&self, plan_id: i64, day: i32) -> Result<Vec<TravelSpot>> {
        let spots = sqlx::query_as::<_, TravelSpot>(
            "SELECT * FROM spot WHERE plan_id = ? AND day = ? ORDER BY order_index",
        )
        .bind(plan_id)
        .bind(day)
        .fetch_all(&self.pool)
        .await?;
        Ok(spots)
    }

    /// Delete a plan together with its spots. Spot rows go first so the
    /// foreign key on `spot.plan_id` never dangles mid-delete. Unknown
    /// ids are a no-op.
    pub async fn delete_plan(&self, plan_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let spots = sqlx::query("DELETE FROM spot WHERE plan_id = ?")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let plans = sqlx::query("DELETE FROM plan WHERE id = ?")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        log::debug!("deleted plan {}: {} plan row(s), {} spot row(s)", plan_id, plans, spots);
        Ok(())
    }
}
