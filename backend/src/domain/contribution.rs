//! Contribution records: one payment by one member for one month.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ContributionId, FieldViolation, MemberId, invalid_request_from};

/// How a contribution was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash in hand.
    #[default]
    Cash,
    /// Bank transfer.
    Bank,
    /// Mobile banking.
    Mobibank,
    /// Mobile money.
    Momo,
}

impl PaymentMethod {
    /// Every method in display order.
    pub const ALL: [Self; 4] = [Self::Cash, Self::Bank, Self::Mobibank, Self::Momo];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Bank => "Bank",
            Self::Mobibank => "MobiBank",
            Self::Momo => "MoMo",
        }
    }
}

/// Calendar month a contribution covers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Period {
    /// Months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Period for a 1-based month number.
    #[must_use]
    pub fn from_month(month: u32) -> Option<Self> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Full month name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jan => "January",
            Self::Feb => "February",
            Self::Mar => "March",
            Self::Apr => "April",
            Self::May => "May",
            Self::Jun => "June",
            Self::Jul => "July",
            Self::Aug => "August",
            Self::Sep => "September",
            Self::Oct => "October",
            Self::Nov => "November",
            Self::Dec => "December",
        }
    }

    /// Three-letter month name used on charts.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }
}

/// A recorded payment.
///
/// At most one contribution exists per `(member_id, period, year)`; the rule
/// is checked when recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// Record id.
    pub id: ContributionId,
    /// Paying member.
    pub member_id: MemberId,
    /// Amount in currency units; fractions are kept as entered.
    pub amount: f64,
    /// Payment channel.
    pub payment_method: PaymentMethod,
    /// Month covered.
    pub period: Period,
    /// Year covered.
    pub year: i32,
    /// Username of whoever recorded the payment.
    pub recorded_by: String,
    /// Recording time.
    pub recorded_at: DateTime<Utc>,
}

impl Contribution {
    /// Whether this contribution occupies the given slot.
    #[must_use]
    pub fn covers(&self, member_id: &MemberId, period: Period, year: i32) -> bool {
        &self.member_id == member_id && self.period == period && self.year == year
    }
}

/// Validation failures for recorded contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionValidationError {
    /// No member was selected.
    EmptyMemberId,
    /// Amount was zero, negative or not a number.
    NonPositiveAmount,
}

impl fmt::Display for ContributionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMemberId => write!(f, "member must be selected"),
            Self::NonPositiveAmount => write!(f, "amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ContributionValidationError {}

impl FieldViolation for ContributionValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyMemberId => "memberId",
            Self::NonPositiveAmount => "amount",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyMemberId => "empty_member_id",
            Self::NonPositiveAmount => "non_positive_amount",
        }
    }
}

invalid_request_from!(ContributionValidationError);

/// Validated request to record a contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContribution {
    /// Paying member.
    pub member_id: MemberId,
    /// Positive, finite amount.
    pub amount: f64,
    /// Payment channel.
    pub payment_method: PaymentMethod,
    /// Month covered.
    pub period: Period,
    /// Year covered.
    pub year: i32,
}

impl NewContribution {
    /// Validate raw form values.
    pub fn try_from_parts(
        member_id: &str,
        amount: f64,
        payment_method: PaymentMethod,
        period: Period,
        year: i32,
    ) -> Result<Self, ContributionValidationError> {
        let member_id = member_id.trim();
        if member_id.is_empty() {
            return Err(ContributionValidationError::EmptyMemberId);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ContributionValidationError::NonPositiveAmount);
        }
        Ok(Self {
            member_id: MemberId::new(member_id),
            amount,
            payment_method,
            period,
            year,
        })
    }
}
