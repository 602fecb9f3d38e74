//! Pure computation of savings goal progress.

use serde::Serialize;
use time::Date;

use super::core::Goal;

/// How a goal is tracking against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStanding {
    /// The target amount has been reached or passed.
    Completed,
    /// The target date has passed without reaching the target.
    Overdue,
    /// At least 75% of the target saved, with time left.
    OnTrack,
    /// Less than 75% of the target saved, with time left.
    Behind,
}

/// The derived progress of one goal. Recomputed on every request, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    /// The saved share of the target, clamped to `[0, 100]` even when the
    /// goal is overfunded.
    pub percentage: f64,
    /// The amount still to save. Never negative.
    pub remaining: f64,
    /// The standing bucket derived from the amounts and the target date.
    pub status: GoalStanding,
    /// Signed day count to the target date: positive while the target is in
    /// the future, negative once it has passed, zero on the day itself
    /// (which still counts as in the future).
    pub days_remaining: i64,
}

/// A goal together with its derived progress, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalOverview {
    /// The stored goal record.
    #[serde(flatten)]
    pub goal: Goal,
    /// The derived progress.
    #[serde(flatten)]
    pub progress: GoalProgress,
}

/// Aggregate totals across all of a user's goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalSummary {
    /// The number of goals.
    pub count: u32,
    /// The sum of all target amounts.
    pub total_target: f64,
    /// The sum of all saved amounts.
    pub total_saved: f64,
    /// The mean of each goal's individually clamped percentage. This is not
    /// the ratio of the sums: one overfunded goal cannot mask another that
    /// is behind.
    pub average_percentage: f64,
}

/// Compute the progress of one goal as of `today`.
pub fn compute_goal_progress(goal: &Goal, today: Date) -> GoalProgress {
    let percentage = if goal.target_amount > 0.0 {
        (goal.current_amount / goal.target_amount * 100.0).min(100.0)
    } else {
        0.0
    };

    let status = if goal.current_amount >= goal.target_amount {
        GoalStanding::Completed
    } else if goal.target_date < today {
        GoalStanding::Overdue
    } else if percentage >= 75.0 {
        GoalStanding::OnTrack
    } else {
        GoalStanding::Behind
    };

    GoalProgress {
        percentage,
        remaining: (goal.target_amount - goal.current_amount).max(0.0),
        status,
        days_remaining: (goal.target_date - today).whole_days(),
    }
}

/// Compute the progress of each goal as of `today`.
pub fn compute_goal_overviews(goals: Vec<Goal>, today: Date) -> Vec<GoalOverview> {
    goals
        .into_iter()
        .map(|goal| {
            let progress = compute_goal_progress(&goal, today);
            GoalOverview { goal, progress }
        })
        .collect()
}

/// Aggregate count, total target, total saved, and average progress across a
/// user's goals.
pub fn summarize_goals(overviews: &[GoalOverview]) -> GoalSummary {
    let count = overviews.len() as u32;
    let total_progress: f64 = overviews
        .iter()
        .map(|overview| overview.progress.percentage)
        .sum();

    GoalSummary {
        count,
        total_target: overviews
            .iter()
            .map(|overview| overview.goal.target_amount)
            .sum(),
        total_saved: overviews
            .iter()
            .map(|overview| overview.goal.current_amount)
            .sum(),
        average_percentage: if count > 0 {
            total_progress / f64::from(count)
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::goal::Goal;

    use super::{
        GoalStanding, compute_goal_overviews, compute_goal_progress, summarize_goals,
    };

    const TODAY: time::Date = date!(2024 - 03 - 15);

    fn goal(target_amount: f64, current_amount: f64, target_date: time::Date) -> Goal {
        Goal {
            id: 1,
            user_id: 1,
            title: "Holiday".to_owned(),
            target_amount,
            current_amount,
            target_date,
            created_at: datetime!(2024-01-01 12:00 UTC),
        }
    }

    #[test]
    fn overfunded_goal_is_completed_with_clamped_percentage() {
        let progress = compute_goal_progress(&goal(1000.0, 1200.0, date!(2024 - 12 - 31)), TODAY);

        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.status, GoalStanding::Completed);
    }

    #[test]
    fn past_target_date_is_overdue_with_negative_days() {
        let progress = compute_goal_progress(&goal(1000.0, 300.0, date!(2024 - 03 - 14)), TODAY);

        assert_eq!(progress.status, GoalStanding::Overdue);
        assert_eq!(progress.days_remaining, -1);
    }

    #[test]
    fn target_date_today_is_not_overdue() {
        let progress = compute_goal_progress(&goal(1000.0, 300.0, TODAY), TODAY);

        assert_eq!(progress.days_remaining, 0);
        assert_eq!(progress.status, GoalStanding::Behind);
    }

    #[test]
    fn standing_boundary_is_closed_at_75_percent() {
        let future = date!(2024 - 12 - 31);

        let on_track = compute_goal_progress(&goal(1000.0, 750.0, future), TODAY);
        assert_eq!(on_track.status, GoalStanding::OnTrack);

        let behind = compute_goal_progress(&goal(1000.0, 749.0, future), TODAY);
        assert_eq!(behind.status, GoalStanding::Behind);
    }

    #[test]
    fn completion_takes_precedence_over_the_target_date() {
        // Reached the target after the date passed: completed, not overdue.
        let progress = compute_goal_progress(&goal(1000.0, 1000.0, date!(2024 - 01 - 01)), TODAY);

        assert_eq!(progress.status, GoalStanding::Completed);
    }

    #[test]
    fn days_remaining_counts_forward_to_the_target() {
        let progress = compute_goal_progress(&goal(1000.0, 300.0, date!(2024 - 03 - 25)), TODAY);

        assert_eq!(progress.days_remaining, 10);
    }

    #[test]
    fn zero_target_resolves_to_zero_percentage() {
        let progress = compute_goal_progress(&goal(0.0, 0.0, date!(2024 - 12 - 31)), TODAY);

        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn summary_averages_clamped_percentages_not_the_ratio_of_sums() {
        let goals = vec![
            goal(1000.0, 500.0, date!(2024 - 12 - 31)),
            goal(1000.0, 1500.0, date!(2024 - 12 - 31)),
        ];

        let overviews = compute_goal_overviews(goals, TODAY);
        let summary = summarize_goals(&overviews);

        // (50 + 100) / 2, not (2000 / 2000) * 100.
        assert_eq!(summary.average_percentage, 75.0);
        assert_eq!(summary.total_target, 2000.0);
        assert_eq!(summary.total_saved, 2000.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn summary_of_no_goals_is_all_zero() {
        let summary = summarize_goals(&[]);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_target, 0.0);
        assert_eq!(summary.total_saved, 0.0);
        assert_eq!(summary.average_percentage, 0.0);
    }

    #[test]
    fn overview_serializes_goal_and_progress_as_one_object() {
        let overviews =
            compute_goal_overviews(vec![goal(1000.0, 300.0, date!(2024 - 03 - 25))], TODAY);

        let value = serde_json::to_value(&overviews[0]).unwrap();

        assert_eq!(value["title"], "Holiday");
        assert_eq!(value["percentage"], 30.0);
        assert_eq!(value["remaining"], 700.0);
        assert_eq!(value["status"], "behind");
        assert_eq!(value["days_remaining"], 10);
    }
}
