//! Roster Source Records
//!
//! Rows as they come from the order store. Amounts are minor currency units.

use serde::{Deserialize, Deserializer};

/// Player customization attached to an order line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Customization {
    /// Garment size
    #[serde(default)]
    pub size: Option<String>,

    /// Jersey number
    #[serde(default, deserialize_with = "jersey_number")]
    pub jersey_number: Option<String>,

    /// Player account identifier
    #[serde(default)]
    pub player_id: Option<String>,

    /// Player name printed on the garment
    #[serde(default)]
    pub player_name: Option<String>,
}

/// A confirmed order line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItemRecord {
    /// Line identifier
    pub id: String,

    /// Owning team order
    pub order_id: String,

    /// Product identifier
    pub product_id: String,

    /// Product name at the time of ordering
    #[serde(default)]
    pub product_name: Option<String>,

    /// Units on this line
    #[serde(default = "one")]
    pub quantity: u32,

    /// Unit price in minor units
    pub unit_price: i64,

    /// Size, number and player for this line
    #[serde(default)]
    pub customization: Customization,
}

/// Player information submitted separately from the order line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerSubmission {
    /// Team order
    pub order_id: String,

    /// Player account identifier
    pub player_id: String,

    /// Player name
    #[serde(default)]
    pub player_name: Option<String>,

    /// Garment size
    #[serde(default)]
    pub size: Option<String>,

    /// Jersey number
    #[serde(default, deserialize_with = "jersey_number")]
    pub jersey_number: Option<String>,
}

/// Payment contribution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    /// Awaiting payment
    Pending,
    /// Paid
    Completed,
    /// Approved by the team manager
    Approved,
    /// Refused or refunded
    Rejected,
    /// Any status this engine does not know
    #[serde(other)]
    Unknown,
}

impl ContributionStatus {
    /// Whether the contribution counts as paid.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Approved)
    }
}

/// A payer's contribution towards a team order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentContribution {
    /// Team order
    pub order_id: String,

    /// Paying player
    pub payer_id: String,

    /// Amount in minor units
    pub amount: i64,

    /// Payment status
    pub status: ContributionStatus,
}

/// A roster row on a design request, before any order exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesignRequestMember {
    /// Roster row identifier
    pub member_id: String,

    /// Player account identifier, when the player has one
    #[serde(default)]
    pub player_id: Option<String>,

    /// Player name
    #[serde(default)]
    pub name: Option<String>,

    /// Garment size
    #[serde(default)]
    pub size: Option<String>,

    /// Jersey number
    #[serde(default, deserialize_with = "jersey_number")]
    pub jersey_number: Option<String>,

    /// Whether the player has paid
    #[serde(default)]
    pub payment_paid: Option<bool>,
}

/// A garment selected on a design request, with its stored price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApparelSelection {
    /// Product identifier
    pub product_id: String,

    /// Product name
    #[serde(default)]
    pub product_name: Option<String>,

    /// Unit price in minor units
    pub unit_price: i64,
}

const fn one() -> u32 {
    1
}

/// Jersey numbers arrive as either strings or integers.
fn jersey_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Text(String),
        Integer(i64),
    }

    Ok(
        Option::<Number>::deserialize(deserializer)?.map(|number| match number {
            Number::Text(text) => text,
            Number::Integer(value) => value.to_string(),
        }),
    )
}
