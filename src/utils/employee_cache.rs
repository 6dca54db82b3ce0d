use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::employee::Employee;

/// Hot employee profiles, keyed by id. Payroll generation and attendance
/// summaries hit this before the database.
pub static EMPLOYEE_CACHE: Lazy<Cache<u64, Employee>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(50_000)
        .time_to_live(Duration::from_secs(3600)) // 1h TTL
        .build()
});

const EMPLOYEE_COLUMNS: &str =
    "id, employee_code, first_name, last_name, email, phone, base_salary, hire_date, status";

/// Cache-through lookup of one employee.
pub async fn get_employee(pool: &MySqlPool, employee_id: u64) -> Result<Option<Employee>> {
    if let Some(hit) = EMPLOYEE_CACHE.get(&employee_id).await {
        return Ok(Some(hit));
    }

    let sql = format!("SELECT {} FROM employees WHERE id = ?", EMPLOYEE_COLUMNS);
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

    if let Some(ref emp) = employee {
        EMPLOYEE_CACHE.insert(employee_id, emp.clone()).await;
    }

    Ok(employee)
}

/// Drop a cached profile after an update or delete.
pub async fn invalidate(employee_id: u64) {
    EMPLOYEE_CACHE.invalidate(&employee_id).await;
}

async fn batch_insert(employees: &[Employee]) {
    let futures: Vec<_> = employees
        .iter()
        .map(|e| EMPLOYEE_CACHE.insert(e.id, e.clone()))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load ACTIVE employees into the in-memory cache at startup (batched).
pub async fn warmup_employee_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let sql = format!(
        "SELECT {} FROM employees WHERE status = 'active'",
        EMPLOYEE_COLUMNS
    );
    let mut stream = sqlx::query_as::<_, Employee>(&sql).fetch(pool);

    let mut batch: Vec<Employee> = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_insert(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_insert(&batch).await;
    }

    log::info!(
        "Employee cache warmup complete: {} active employees",
        total_count
    );

    Ok(())
}
