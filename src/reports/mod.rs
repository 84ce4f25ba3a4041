//! Read-only hiring reports.
//!
//! Both reports count hires of a single calendar year, joined to the
//! department (and job) they reference. Hires whose department or job does
//! not exist are left out, since they have no name to report under.
//! `hired_at` is read with SQLite's `strftime`, which accepts `YYYY-MM-DD`,
//! `YYYY-MM-DD HH:MM:SS` and ISO-8601 `...THH:MM:SSZ` values.

use serde::Serialize;
use sqlx::Row;

use crate::error_handling::DatabaseError;
use crate::storage::Session;

/// Hires for one department and job, per quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterlyHires {
    pub department: String,
    pub job: String,
    pub q1: i64,
    pub q2: i64,
    pub q3: i64,
    pub q4: i64,
}

/// Hire count of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentHires {
    pub id: i64,
    pub department: String,
    pub hired: i64,
}

const QUARTERLY_HIRES: &str = "
    SELECT d.name AS department,
           j.title AS job,
           SUM(CASE WHEN CAST(strftime('%m', h.hired_at) AS INTEGER) BETWEEN 1 AND 3 THEN 1 ELSE 0 END) AS q1,
           SUM(CASE WHEN CAST(strftime('%m', h.hired_at) AS INTEGER) BETWEEN 4 AND 6 THEN 1 ELSE 0 END) AS q2,
           SUM(CASE WHEN CAST(strftime('%m', h.hired_at) AS INTEGER) BETWEEN 7 AND 9 THEN 1 ELSE 0 END) AS q3,
           SUM(CASE WHEN CAST(strftime('%m', h.hired_at) AS INTEGER) BETWEEN 10 AND 12 THEN 1 ELSE 0 END) AS q4
    FROM hired_employees h
    JOIN departments d ON d.id = h.department_id
    JOIN jobs j ON j.id = h.job_id
    WHERE strftime('%Y', h.hired_at) = ?
    GROUP BY d.name, j.title
    ORDER BY d.name, j.title";

const DEPARTMENTS_ABOVE_MEAN: &str = "
    WITH counts AS (
        SELECT d.id AS id, d.name AS department, COUNT(h.id) AS hired
        FROM hired_employees h
        JOIN departments d ON d.id = h.department_id
        WHERE strftime('%Y', h.hired_at) = ?
        GROUP BY d.id, d.name
    )
    SELECT id, department, hired
    FROM counts
    WHERE hired > (SELECT AVG(hired) FROM counts)
    ORDER BY hired DESC, id";

/// Hires per department and job for each quarter of `year`.
pub async fn quarterly_hires(
    session: &mut Session,
    year: i32,
) -> Result<Vec<QuarterlyHires>, DatabaseError> {
    let rows = sqlx::query(QUARTERLY_HIRES)
        .bind(format!("{year:04}"))
        .fetch_all(session.conn())
        .await?;

    let report = rows
        .iter()
        .map(|row| {
            Ok(QuarterlyHires {
                department: row.try_get("department")?,
                job: row.try_get("job")?,
                q1: row.try_get("q1")?,
                q2: row.try_get("q2")?,
                q3: row.try_get("q3")?,
                q4: row.try_get("q4")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(report)
}

/// Departments whose hire count in `year` is strictly above the mean count
/// over all departments that hired that year.
pub async fn departments_above_mean(
    session: &mut Session,
    year: i32,
) -> Result<Vec<DepartmentHires>, DatabaseError> {
    let rows = sqlx::query(DEPARTMENTS_ABOVE_MEAN)
        .bind(format!("{year:04}"))
        .fetch_all(session.conn())
        .await?;

    let report = rows
        .iter()
        .map(|row| {
            Ok(DepartmentHires {
                id: row.try_get("id")?,
                department: row.try_get("department")?,
                hired: row.try_get("hired")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(report)
}
