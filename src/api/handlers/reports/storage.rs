//! Database helpers for report persistence.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::ReportRequest;

/// A stored report, owned by the user who filed it.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert a report for `user_id` and return the stored row.
///
/// Ids are UUIDv7 so they sort by creation time.
///
/// # Errors
///
/// Returns an error when the insert fails.
pub async fn insert_report(
    pool: &PgPool,
    user_id: Uuid,
    request: &ReportRequest,
) -> Result<ReportRow> {
    let id = Uuid::now_v7();
    let query = r"
        INSERT INTO reports
            (id, user_id, title, description, category, latitude, longitude, location_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.location_name.as_deref())
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert report")?;

    Ok(ReportRow {
        id,
        title: request.title.clone(),
        description: request.description.clone(),
        category: request.category.clone(),
        latitude: request.latitude,
        longitude: request.longitude,
        location_name: request.location_name.clone(),
        created_at: row.try_get("created_at")?,
    })
}

/// List the caller's reports, newest first.
///
/// # Errors
///
/// Returns an error when the query fails.
pub async fn list_reports_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ReportRow>> {
    let query = r"
        SELECT id, title, description, category, latitude, longitude, location_name, created_at
        FROM reports
        WHERE user_id = $1
        ORDER BY created_at DESC
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .bind(user_id)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list reports")?;

    rows.into_iter()
        .map(|row| {
            Ok(ReportRow {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                category: row.try_get("category")?,
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
                location_name: row.try_get("location_name")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}
