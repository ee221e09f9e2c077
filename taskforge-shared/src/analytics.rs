/// On-demand analytics rollups
///
/// The rollup is computed from scratch on every call from the current user's
/// full task set, joined through owned projects. Nothing is persisted and
/// nothing is maintained incrementally.
///
/// All three status buckets and all four priority buckets are always present
/// in the output, zero-filled when empty. The per-project breakdown is keyed
/// by project *name*; two same-named projects under one owner merge their
/// counts, a documented quirk of the rollup contract.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::task::{TaskPriority, TaskStatus};

/// One task's worth of rollup input
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RollupRow {
    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Name of the owning project
    pub project_name: String,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Last mutation time; stands in for completion time on Done tasks
    pub updated_at: DateTime<Utc>,
}

/// Aggregated view of one user's tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Total number of tasks across all owned projects
    pub total_tasks: u64,

    /// Count per status; every status present, zero-filled
    pub tasks_by_status: BTreeMap<String, u64>,

    /// Count per priority; every priority present, zero-filled
    pub tasks_by_priority: BTreeMap<String, u64>,

    /// Count per project name (same-name projects merge)
    pub tasks_by_project: BTreeMap<String, u64>,

    /// Tasks with a due date strictly before now and status not Done
    pub overdue_tasks: u64,

    /// Done tasks last touched on the current UTC calendar date
    pub completed_today: u64,

    /// Done tasks last touched within the trailing 7 days
    pub completed_this_week: u64,
}

/// Folds rollup rows into a summary, with `now` injected for testability
pub fn summarize(rows: &[RollupRow], now: DateTime<Utc>) -> AnalyticsSummary {
    let mut tasks_by_status: BTreeMap<String, u64> = TaskStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let mut tasks_by_priority: BTreeMap<String, u64> = TaskPriority::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), 0))
        .collect();
    let mut tasks_by_project: BTreeMap<String, u64> = BTreeMap::new();

    let mut overdue_tasks = 0;
    let mut completed_today = 0;
    let mut completed_this_week = 0;

    let today = now.date_naive();
    let week_ago = now - Duration::days(7);

    for row in rows {
        *tasks_by_status
            .entry(row.status.as_str().to_string())
            .or_insert(0) += 1;
        *tasks_by_priority
            .entry(row.priority.as_str().to_string())
            .or_insert(0) += 1;
        *tasks_by_project.entry(row.project_name.clone()).or_insert(0) += 1;

        if row.status != TaskStatus::Done {
            if let Some(due) = row.due_date {
                if due < now {
                    overdue_tasks += 1;
                }
            }
        } else {
            if row.updated_at.date_naive() == today {
                completed_today += 1;
            }
            if row.updated_at >= week_ago {
                completed_this_week += 1;
            }
        }
    }

    AnalyticsSummary {
        total_tasks: rows.len() as u64,
        tasks_by_status,
        tasks_by_priority,
        tasks_by_project,
        overdue_tasks,
        completed_today,
        completed_this_week,
    }
}

/// Computes the rollup for one owner's full task set
pub async fn rollup_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<AnalyticsSummary, sqlx::Error> {
    let rows = sqlx::query_as::<_, RollupRow>(
        r#"
        SELECT t.status, t.priority, p.name AS project_name, t.due_date, t.updated_at
        FROM tasks t
        JOIN projects p ON p.id = t.project_id
        WHERE p.owner_id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(summarize(&rows, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        status: TaskStatus,
        priority: TaskPriority,
        project: &str,
        due_date: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> RollupRow {
        RollupRow {
            status,
            priority,
            project_name: project.to_string(),
            due_date,
            updated_at,
        }
    }

    #[test]
    fn test_empty_task_set_is_zero_filled() {
        let summary = summarize(&[], Utc::now());

        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.tasks_by_status.len(), 3);
        assert_eq!(summary.tasks_by_priority.len(), 4);
        assert!(summary.tasks_by_status.values().all(|&c| c == 0));
        assert!(summary.tasks_by_priority.values().all(|&c| c == 0));
        assert!(summary.tasks_by_project.is_empty());
        assert_eq!(summary.overdue_tasks, 0);
        assert_eq!(summary.completed_today, 0);
        assert_eq!(summary.completed_this_week, 0);
    }

    #[test]
    fn test_two_project_breakdown() {
        // Alpha: 2 To Do + 1 Done (Low/Medium/High); Beta: 1 In Progress (Urgent)
        let now = Utc::now();
        let rows = vec![
            row(TaskStatus::Todo, TaskPriority::Low, "Alpha", None, now),
            row(TaskStatus::Todo, TaskPriority::Medium, "Alpha", None, now),
            row(TaskStatus::Done, TaskPriority::High, "Alpha", None, now),
            row(TaskStatus::InProgress, TaskPriority::Urgent, "Beta", None, now),
        ];

        let summary = summarize(&rows, now);

        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.tasks_by_status["To Do"], 2);
        assert_eq!(summary.tasks_by_status["In Progress"], 1);
        assert_eq!(summary.tasks_by_status["Done"], 1);
        assert_eq!(summary.tasks_by_priority["Low"], 1);
        assert_eq!(summary.tasks_by_priority["Medium"], 1);
        assert_eq!(summary.tasks_by_priority["High"], 1);
        assert_eq!(summary.tasks_by_priority["Urgent"], 1);
        assert_eq!(summary.tasks_by_project["Alpha"], 3);
        assert_eq!(summary.tasks_by_project["Beta"], 1);
    }

    #[test]
    fn test_overdue_excludes_done_tasks() {
        let now = Utc::now();
        let yesterday = now - Duration::days(1);

        let rows = vec![
            row(TaskStatus::Todo, TaskPriority::Low, "P", Some(yesterday), now),
            row(TaskStatus::InProgress, TaskPriority::Low, "P", Some(yesterday), now),
            // Done past its due date is not overdue
            row(TaskStatus::Done, TaskPriority::Low, "P", Some(yesterday), now),
            // Due in the future is not overdue
            row(
                TaskStatus::Todo,
                TaskPriority::Low,
                "P",
                Some(now + Duration::days(1)),
                now,
            ),
            // No due date is never overdue
            row(TaskStatus::Todo, TaskPriority::Low, "P", None, now),
        ];

        assert_eq!(summarize(&rows, now).overdue_tasks, 2);
    }

    #[test]
    fn test_completed_windows() {
        // Fixed clock mid-day so "earlier today" stays on the same date
        let now = DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let rows = vec![
            // Done earlier today: counts for today and the week
            row(
                TaskStatus::Done,
                TaskPriority::Low,
                "P",
                None,
                now - Duration::hours(3),
            ),
            // Done three days ago: week only
            row(
                TaskStatus::Done,
                TaskPriority::Low,
                "P",
                None,
                now - Duration::days(3),
            ),
            // Done ten days ago: neither window
            row(
                TaskStatus::Done,
                TaskPriority::Low,
                "P",
                None,
                now - Duration::days(10),
            ),
            // Touched today but not Done: neither
            row(TaskStatus::InProgress, TaskPriority::Low, "P", None, now),
        ];

        let summary = summarize(&rows, now);
        assert_eq!(summary.completed_today, 1);
        assert_eq!(summary.completed_this_week, 2);
    }

    #[test]
    fn test_same_name_projects_merge_counts() {
        let now = Utc::now();
        let rows = vec![
            row(TaskStatus::Todo, TaskPriority::Low, "Dup", None, now),
            row(TaskStatus::Todo, TaskPriority::Low, "Dup", None, now),
        ];

        let summary = summarize(&rows, now);
        assert_eq!(summary.tasks_by_project.len(), 1);
        assert_eq!(summary.tasks_by_project["Dup"], 2);
    }
}
