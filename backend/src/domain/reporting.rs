//! Statistics over already scoped records.
//!
//! Nothing here filters by session or touches storage; callers scope first.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    Contribution, EducationLevel, Member, MemberId, PaymentMethod, Period, Role, Syndicate,
    SyndicateId,
};

/// Contributions listed by the summary's recent table.
pub const RECENT_CONTRIBUTIONS: usize = 10;
/// Contributions listed by the dashboard's activity feed.
pub const RECENT_ACTIVITY: usize = 5;

/// Total and count for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// Month.
    pub period: Period,
    /// Short month label.
    pub month: String,
    /// Sum of amounts.
    pub amount: f64,
    /// Number of contributions.
    pub count: usize,
}

/// One non-empty bucket of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DistributionBucket {
    /// Bucket label.
    pub name: String,
    /// Records in the bucket.
    pub value: usize,
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Visible members.
    pub total_members: usize,
    /// Sum of visible contribution amounts.
    pub total_contributions: f64,
    /// Visible trainings.
    pub total_trainings: usize,
    /// Syndicates in view: every syndicate for admins, otherwise one.
    pub total_syndicates: usize,
    /// Mean contribution amount.
    pub avg_contribution: f64,
}

/// Per-syndicate totals shown to administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyndicatePerformance {
    /// Syndicate id.
    pub syndicate_id: SyndicateId,
    /// Syndicate name.
    pub name: String,
    /// Live member count.
    pub members: usize,
    /// Sum of the members' contributions.
    pub contributions: f64,
    /// Contributions divided by members.
    pub avg_contribution: f64,
}

/// A contribution paired with the payer's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionActivity {
    /// The contribution.
    #[serde(flatten)]
    pub contribution: Contribution,
    /// Payer name, `Unknown` when the member is not visible.
    pub member_name: String,
}

/// Figures shown above the contribution list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    /// All-time total.
    pub total: f64,
    /// Total for the current period and year.
    pub current_month_total: f64,
    /// Distinct payers, or the payment count for member sessions.
    pub contributors: usize,
    /// Most recently recorded contributions, newest first.
    pub recent: Vec<ContributionActivity>,
}

/// Sum of amounts.
#[must_use]
pub fn total_amount(contributions: &[Contribution]) -> f64 {
    contributions.iter().map(|contribution| contribution.amount).sum()
}

/// Mean amount; zero for an empty set.
#[must_use]
pub fn average_amount(contributions: &[Contribution]) -> f64 {
    ratio(total_amount(contributions), contributions.len())
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Twelve zero-filled months in calendar order, optionally for one year.
#[must_use]
pub fn monthly_series(contributions: &[Contribution], year: Option<i32>) -> Vec<MonthlyTotal> {
    Period::ALL
        .iter()
        .map(|&period| {
            let (amount, count) = contributions
                .iter()
                .filter(|c| c.period == period && year.is_none_or(|y| c.year == y))
                .fold((0.0_f64, 0_usize), |(amount, count), c| (amount + c.amount, count + 1));
            MonthlyTotal {
                period,
                month: period.short_label().to_owned(),
                amount,
                count,
            }
        })
        .collect()
}

fn buckets<T>(
    values: &[T],
    labelled: impl IntoIterator<Item = (T, &'static str)>,
) -> Vec<DistributionBucket>
where
    T: Copy + PartialEq,
{
    labelled
        .into_iter()
        .map(|(bucket, name)| DistributionBucket {
            name: name.to_owned(),
            value: values.iter().filter(|value| **value == bucket).count(),
        })
        .filter(|bucket| bucket.value > 0)
        .collect()
}

/// Members per education level, empty levels omitted.
#[must_use]
pub fn education_distribution(members: &[Member]) -> Vec<DistributionBucket> {
    let levels: Vec<EducationLevel> = members
        .iter()
        .map(|member| member.profile.education_level)
        .collect();
    buckets(&levels, EducationLevel::ALL.map(|level| (level, level.label())))
}

/// Contributions per payment method, empty methods omitted.
#[must_use]
pub fn payment_method_distribution(contributions: &[Contribution]) -> Vec<DistributionBucket> {
    let methods: Vec<PaymentMethod> = contributions
        .iter()
        .map(|contribution| contribution.payment_method)
        .collect();
    buckets(&methods, PaymentMethod::ALL.map(|method| (method, method.label())))
}

/// Headline figures for `role` over scoped records.
///
/// `syndicates` is the full collection; only its length is used, and only
/// for admins.
#[must_use]
pub fn dashboard_stats(
    role: Role,
    syndicates: &[Syndicate],
    members: &[Member],
    contributions: &[Contribution],
    trainings: usize,
) -> DashboardStats {
    DashboardStats {
        total_members: members.len(),
        total_contributions: total_amount(contributions),
        total_trainings: trainings,
        total_syndicates: if role == Role::Admin {
            syndicates.len()
        } else {
            1
        },
        avg_contribution: average_amount(contributions),
    }
}

/// Live totals per syndicate, in syndicate order.
#[must_use]
pub fn syndicate_performance(
    syndicates: &[Syndicate],
    members: &[Member],
    contributions: &[Contribution],
) -> Vec<SyndicatePerformance> {
    let mut payers: HashMap<&MemberId, &SyndicateId> = HashMap::new();
    for member in members {
        payers.insert(&member.id, &member.syndicate_id);
    }
    syndicates
        .iter()
        .map(|syndicate| {
            let member_count = members
                .iter()
                .filter(|member| member.syndicate_id == syndicate.id)
                .count();
            let total = contributions
                .iter()
                .filter(|c| payers.get(&c.member_id) == Some(&&syndicate.id))
                .map(|c| c.amount)
                .sum::<f64>();
            SyndicatePerformance {
                syndicate_id: syndicate.id.clone(),
                name: syndicate.name.clone(),
                members: member_count,
                contributions: total,
                avg_contribution: ratio(total, member_count),
            }
        })
        .collect()
}

fn with_member_name(contribution: &Contribution, members: &[Member]) -> ContributionActivity {
    let member_name = members
        .iter()
        .find(|member| member.id == contribution.member_id)
        .map_or_else(|| "Unknown".to_owned(), |member| member.name().to_owned());
    ContributionActivity {
        contribution: contribution.clone(),
        member_name,
    }
}

/// The last [`RECENT_ACTIVITY`] contributions in stored order, newest first.
#[must_use]
pub fn recent_activity(contributions: &[Contribution], members: &[Member]) -> Vec<ContributionActivity> {
    contributions
        .iter()
        .rev()
        .take(RECENT_ACTIVITY)
        .map(|contribution| with_member_name(contribution, members))
        .collect()
}

/// Figures for the contribution view.
///
/// `current` is the period and year the clock reads now.
#[must_use]
pub fn contribution_summary(
    role: Role,
    contributions: &[Contribution],
    members: &[Member],
    current: (Period, i32),
) -> ContributionSummary {
    let (period, year) = current;
    let current_month: Vec<Contribution> = contributions
        .iter()
        .filter(|c| c.period == period && c.year == year)
        .cloned()
        .collect();
    let contributors = if role == Role::Member {
        contributions.len()
    } else {
        contributions
            .iter()
            .map(|c| &c.member_id)
            .collect::<HashSet<_>>()
            .len()
    };
    let mut by_recency: Vec<&Contribution> = contributions.iter().collect();
    by_recency.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    ContributionSummary {
        total: total_amount(contributions),
        current_month_total: total_amount(&current_month),
        contributors,
        recent: by_recency
            .into_iter()
            .take(RECENT_CONTRIBUTIONS)
            .map(|contribution| with_member_name(contribution, members))
            .collect(),
    }
}
