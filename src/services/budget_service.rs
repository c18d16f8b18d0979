//! Expense tracking for plans.
//!
//! Budget entries only reference a plan by id; they are created and
//! deleted on their own and are not part of the plan's delete cascade.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::Result;
use crate::models::budget::Budget;

#[derive(Clone)]
pub struct BudgetService {
    pool: SqlitePool,
}

impl BudgetService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one expense entry. Returns whether a row was written.
    pub async fn add_entry(&self, entry: &Budget) -> Result<bool> {
        let now = Utc::now();
        let rows = sqlx::query(
            r#"
            INSERT INTO budget (plan_id, category, amount, remark, expense_date,
                                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.plan_id)
        .bind(&entry.category)
        .bind(entry.amount)
        .bind(&entry.remark)
        .bind(entry.expense_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows == 1)
    }

    /// Expenses of one plan in chronological order.
    pub async fn entries_for_plan(&self, plan_id: i64) -> Result<Vec<Budget>> {
        let entries = sqlx::query_as::<_, Budget>(
            "SELECT * FROM budget WHERE plan_id = ? ORDER BY expense_date ASC",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Delete one entry by id. Returns whether a row actually went away.
    pub async fn delete_entry(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM budget WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::initialize_database(&pool).await.unwrap();
        pool
    }

    fn entry(plan_id: i64, category: &str, amount: f64, date: &str) -> Budget {
        Budget {
            id: None,
            plan_id,
            category: category.to_string(),
            amount,
            remark: None,
            expense_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn entries_come_back_in_expense_date_order() {
        let service = BudgetService::new(test_pool().await);

        assert!(service.add_entry(&entry(1, "hotel", 320.0, "2025-05-03")).await.unwrap());
        assert!(service.add_entry(&entry(1, "food", 45.5, "2025-05-01")).await.unwrap());
        assert!(service.add_entry(&entry(1, "transport", 12.0, "2025-05-02")).await.unwrap());

        let entries = service.entries_for_plan(1).await.unwrap();

        let categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["food", "transport", "hotel"]);
        assert_eq!(entries[0].amount, 45.5);
        assert!(entries[0].id.is_some());
        assert!(entries[0].created_at.is_some());
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_requested_plan() {
        let service = BudgetService::new(test_pool().await);

        service.add_entry(&entry(1, "food", 10.0, "2025-05-01")).await.unwrap();
        service.add_entry(&entry(2, "food", 20.0, "2025-05-01")).await.unwrap();

        let entries = service.entries_for_plan(1).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 10.0);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let service = BudgetService::new(test_pool().await);

        service.add_entry(&entry(1, "food", 10.0, "2025-05-01")).await.unwrap();
        let stored = service.entries_for_plan(1).await.unwrap();
        let id = stored[0].id.unwrap();

        assert!(service.delete_entry(id).await.unwrap());
        assert!(!service.delete_entry(id).await.unwrap());
        assert!(service.entries_for_plan(1).await.unwrap().is_empty());
    }
}
