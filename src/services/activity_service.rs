use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::activity_repo;
use crate::models::{ActivityOverviewRow, ActivityRow};

#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub activity_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub location: String,
    pub capacity: i64,
}

#[derive(Debug, Serialize)]
pub struct ActivityOverviewView {
    pub activity_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub location: String,
    pub capacity: i64,
    pub enrolled_count: i64,
    pub already_enrolled: bool,
}

pub async fn list(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityView>> {
    let rows = activity_repo::list_activities(pool).await?;
    Ok(rows.into_iter().map(plain_view).collect())
}

pub async fn overview_for(
    pool: &SqlitePool,
    attendee_id: i64,
) -> sqlx::Result<Vec<ActivityOverviewView>> {
    let rows = activity_repo::list_activities_overview(pool, attendee_id).await?;
    Ok(rows.into_iter().map(overview_view).collect())
}

fn plain_view(row: ActivityRow) -> ActivityView {
    ActivityView {
        activity_id: row.activity_id,
        title: row.title,
        description: row.description,
        scheduled_date: row.scheduled_date,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        location: row.location,
        capacity: row.capacity,
    }
}

fn overview_view(row: ActivityOverviewRow) -> ActivityOverviewView {
    ActivityOverviewView {
        activity_id: row.activity_id,
        title: row.title,
        description: row.description,
        scheduled_date: row.scheduled_date,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        location: row.location,
        capacity: row.capacity,
        enrolled_count: row.enrolled_count,
        already_enrolled: row.already_enrolled == 1,
    }
}
