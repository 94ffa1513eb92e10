use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Delivery status of a driver's work item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DriverOrderStatus {
    #[sea_orm(string_value = "Todo")]
    #[serde(rename = "Todo")]
    #[strum(serialize = "Todo")]
    Todo,
    #[sea_orm(string_value = "On the way")]
    #[serde(rename = "On the way")]
    #[strum(serialize = "On the way")]
    OnTheWay,
    #[sea_orm(string_value = "Completed")]
    #[serde(rename = "Completed")]
    #[strum(serialize = "Completed")]
    Completed,
    #[sea_orm(string_value = "Hold")]
    #[serde(rename = "Hold")]
    #[strum(serialize = "Hold")]
    Hold,
    #[sea_orm(string_value = "Return")]
    #[serde(rename = "Return")]
    #[strum(serialize = "Return")]
    Return,
    #[sea_orm(string_value = "Return Received")]
    #[serde(rename = "Return Received")]
    #[strum(serialize = "Return Received")]
    ReturnReceived,
}

impl DriverOrderStatus {
    /// Parses a status filter the way the mobile client sends it:
    /// case-insensitive, with spaces, dashes or underscores between words.
    pub fn parse_filter(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "todo" => Some(Self::Todo),
            "on the way" | "ontheway" => Some(Self::OnTheWay),
            "completed" => Some(Self::Completed),
            "hold" => Some(Self::Hold),
            "return" => Some(Self::Return),
            "return received" | "returnreceived" => Some(Self::ReturnReceived),
            _ => None,
        }
    }

    /// Statuses an order may move to from `self`.
    pub fn allowed_next(self) -> &'static [DriverOrderStatus] {
        use DriverOrderStatus::*;
        match self {
            Todo => &[OnTheWay, Hold, Return],
            OnTheWay => &[Completed, Hold, Return],
            Hold => &[OnTheWay, Return],
            Return => &[ReturnReceived],
            Completed | ReturnReceived => &[],
        }
    }

    pub fn can_transition_to(self, next: DriverOrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Statuses from which an order may enter `target`
    pub fn sources_of(target: DriverOrderStatus) -> Vec<DriverOrderStatus> {
        Self::iter()
            .filter(|status| status.can_transition_to(target))
            .collect()
    }

    /// An assignment stays active, and blocks reassignment, until the parcel is back at the centre
    pub fn is_active_assignment(self) -> bool {
        self != Self::ReturnReceived
    }

    /// Commerce-side status written alongside this driver status
    pub fn process_status(self) -> ProcessOrderStatus {
        match self {
            Self::Todo => ProcessOrderStatus::Collected,
            Self::OnTheWay => ProcessOrderStatus::OnTheWay,
            Self::Completed => ProcessOrderStatus::Delivered,
            Self::Hold => ProcessOrderStatus::Hold,
            Self::Return => ProcessOrderStatus::Return,
            Self::ReturnReceived => ProcessOrderStatus::ReturnReceived,
        }
    }
}

/// Statuses this service writes to `processorders.status`.
///
/// The column is shared with the commerce back office, which uses other values too,
/// so it stays a plain string on the entity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::EnumString,
)]
pub enum ProcessOrderStatus {
    #[strum(serialize = "Collected")]
    Collected,
    #[strum(serialize = "On the way")]
    OnTheWay,
    #[strum(serialize = "Delivered")]
    Delivered,
    #[strum(serialize = "Hold")]
    Hold,
    #[strum(serialize = "Return")]
    Return,
    #[strum(serialize = "Return Received")]
    ReturnReceived,
}
