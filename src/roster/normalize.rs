//! Roster Normalization
//!
//! Order lines (joined with player submissions and contributions) and design-request roster rows
//! are two shapes of the same thing: one player wearing one garment. [`normalize`] turns either
//! into [`RosterMember`]s.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use crate::roster::records::{
    DesignRequestMember, OrderItemRecord, PaymentContribution, PlayerSubmission,
};

/// Name shown when the display policy hides names.
pub const HIDDEN_NAME: &str = "-";

/// Raw roster data, tagged by where it came from.
#[derive(Debug, Clone, Copy)]
pub enum RosterSource<'r> {
    /// Confirmed order lines, joined with player submissions and payment contributions.
    Order {
        /// Order lines
        items: &'r [OrderItemRecord],
        /// Player submissions, matched to lines by player id
        submissions: &'r [PlayerSubmission],
        /// Payment contributions for the order
        contributions: &'r [PaymentContribution],
    },

    /// A design-request roster, authoritative on its own.
    DesignRequest {
        /// Roster rows
        members: &'r [DesignRequestMember],
    },
}

/// Which name is printed on each jersey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "team_name")]
pub enum JerseyDisplay {
    /// Each player's own name.
    #[default]
    PlayerName,

    /// The same team name for everyone.
    TeamName(String),

    /// No name, shown as [`HIDDEN_NAME`].
    None,
}

impl JerseyDisplay {
    fn display_name(&self, name: &str) -> String {
        match self {
            Self::PlayerName => name.to_string(),
            Self::TeamName(team) => team.clone(),
            Self::None => HIDDEN_NAME.to_string(),
        }
    }
}

/// The order line a member was normalized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Product identifier
    pub product_id: String,

    /// Product name recorded on the line
    pub product_name: Option<String>,

    /// Unit price in minor units
    pub unit_price: i64,

    /// Units on the line
    pub quantity: u32,
}

/// One player entry on a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterMember {
    /// Player account id, or the source row id when the player has no account
    pub player_id: String,

    /// The player's own name
    pub name: String,

    /// Name after the jersey display policy
    pub display_name: String,

    /// Garment size as recorded
    pub size: Option<String>,

    /// Jersey number as recorded
    pub jersey_number: Option<String>,

    /// Whether the player has paid
    pub paid: bool,

    /// Order line, present for order rosters only
    pub line: Option<LineRef>,
}

/// Normalize raw roster records into members.
///
/// For order rosters, the line's own size, number and name win over the player's submission,
/// which only fills gaps. A member is paid only when a `completed` or `approved` contribution
/// from that player exists for the line's order.
pub fn normalize(source: RosterSource<'_>, display: &JerseyDisplay) -> Vec<RosterMember> {
    match source {
        RosterSource::Order {
            items,
            submissions,
            contributions,
        } => normalize_order(items, submissions, contributions, display),
        RosterSource::DesignRequest { members } => normalize_design_request(members, display),
    }
}

/// Sort members by jersey number, numerically.
///
/// Missing or non-numeric numbers count as 0. The sort is stable.
pub fn sort_for_display(members: &mut [RosterMember]) {
    members.sort_by_key(|member| jersey_sort_key(member.jersey_number.as_deref()));
}

fn jersey_sort_key(number: Option<&str>) -> i64 {
    number
        .and_then(|number| number.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

fn normalize_order(
    items: &[OrderItemRecord],
    submissions: &[PlayerSubmission],
    contributions: &[PaymentContribution],
    display: &JerseyDisplay,
) -> Vec<RosterMember> {
    let mut submissions_by_player: FxHashMap<(&str, &str), &PlayerSubmission> =
        FxHashMap::default();

    for submission in submissions {
        submissions_by_player
            .entry((submission.order_id.as_str(), submission.player_id.as_str()))
            .or_insert(submission);
    }

    let settled: FxHashSet<(&str, &str)> = contributions
        .iter()
        .filter(|contribution| contribution.status.is_settled())
        .map(|contribution| (contribution.order_id.as_str(), contribution.payer_id.as_str()))
        .collect();

    items
        .iter()
        .map(|item| {
            let customization = &item.customization;
            let player_id = present(customization.player_id.as_deref()).unwrap_or(item.id.as_str());

            let submission = submissions_by_player
                .get(&(item.order_id.as_str(), player_id))
                .copied();

            let size = present(customization.size.as_deref())
                .or_else(|| submission.and_then(|s| present(s.size.as_deref())));

            let jersey_number = present(customization.jersey_number.as_deref())
                .or_else(|| submission.and_then(|s| present(s.jersey_number.as_deref())));

            let name = present(customization.player_name.as_deref())
                .or_else(|| submission.and_then(|s| present(s.player_name.as_deref())))
                .unwrap_or_default();

            RosterMember {
                player_id: player_id.to_string(),
                name: name.to_string(),
                display_name: display.display_name(name),
                size: size.map(ToString::to_string),
                jersey_number: jersey_number.map(ToString::to_string),
                paid: settled.contains(&(item.order_id.as_str(), player_id)),
                line: Some(LineRef {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                }),
            }
        })
        .collect()
}

fn normalize_design_request(
    members: &[DesignRequestMember],
    display: &JerseyDisplay,
) -> Vec<RosterMember> {
    members
        .iter()
        .map(|member| {
            let name = present(member.name.as_deref()).unwrap_or_default();

            RosterMember {
                player_id: present(member.player_id.as_deref())
                    .unwrap_or(member.member_id.as_str())
                    .to_string(),
                name: name.to_string(),
                display_name: display.display_name(name),
                size: present(member.size.as_deref()).map(ToString::to_string),
                jersey_number: present(member.jersey_number.as_deref()).map(ToString::to_string),
                paid: member.payment_paid.unwrap_or(false),
                line: None,
            }
        })
        .collect()
}

/// Treat blank strings as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use crate::roster::records::{ContributionStatus, Customization};

    use super::*;

    fn item(id: &str, player: Option<&str>, size: Option<&str>, number: Option<&str>) -> OrderItemRecord {
        OrderItemRecord {
            id: id.to_string(),
            order_id: "order-1".to_string(),
            product_id: "jersey".to_string(),
            product_name: Some("Home Jersey".to_string()),
            quantity: 1,
            unit_price: 12_000,
            customization: Customization {
                size: size.map(ToString::to_string),
                jersey_number: number.map(ToString::to_string),
                player_id: player.map(ToString::to_string),
                player_name: None,
            },
        }
    }

    fn submission(player: &str, name: &str, size: Option<&str>, number: Option<&str>) -> PlayerSubmission {
        PlayerSubmission {
            order_id: "order-1".to_string(),
            player_id: player.to_string(),
            player_name: Some(name.to_string()),
            size: size.map(ToString::to_string),
            jersey_number: number.map(ToString::to_string),
        }
    }

    fn contribution(payer: &str, status: ContributionStatus) -> PaymentContribution {
        PaymentContribution {
            order_id: "order-1".to_string(),
            payer_id: payer.to_string(),
            amount: 12_000,
            status,
        }
    }

    fn member(id: &str, name: &str, size: Option<&str>, number: Option<&str>) -> DesignRequestMember {
        DesignRequestMember {
            member_id: id.to_string(),
            player_id: None,
            name: Some(name.to_string()),
            size: size.map(ToString::to_string),
            jersey_number: number.map(ToString::to_string),
            payment_paid: None,
        }
    }

    #[test]
    fn order_line_fields_win_over_submission() {
        let items = [item("i1", Some("p1"), Some("L"), Some("9"))];
        let submissions = [submission("p1", "Ana", Some("M"), Some("10"))];

        let members = normalize(
            RosterSource::Order {
                items: &items,
                submissions: &submissions,
                contributions: &[],
            },
            &JerseyDisplay::PlayerName,
        );

        assert_eq!(members.len(), 1);
        assert_eq!(members.first().and_then(|m| m.size.as_deref()), Some("L"));
        assert_eq!(members.first().and_then(|m| m.jersey_number.as_deref()), Some("9"));
        assert_eq!(members.first().map(|m| m.name.as_str()), Some("Ana"));
    }

    #[test]
    fn submission_fills_missing_line_fields() {
        let items = [item("i1", Some("p1"), None, Some("  "))];
        let submissions = [submission("p1", "Ana", Some("M"), Some("10"))];

        let members = normalize(
            RosterSource::Order {
                items: &items,
                submissions: &submissions,
                contributions: &[],
            },
            &JerseyDisplay::PlayerName,
        );

        assert_eq!(members.first().and_then(|m| m.size.as_deref()), Some("M"));
        assert_eq!(members.first().and_then(|m| m.jersey_number.as_deref()), Some("10"));
    }

    #[test]
    fn lines_without_player_fall_back_to_line_id() {
        let items = [item("i1", None, Some("S"), None)];

        let members = normalize(
            RosterSource::Order {
                items: &items,
                submissions: &[],
                contributions: &[],
            },
            &JerseyDisplay::PlayerName,
        );

        assert_eq!(members.first().map(|m| m.player_id.as_str()), Some("i1"));
        assert_eq!(members.first().map(|m| m.name.as_str()), Some(""));
        assert_eq!(
            members.first().and_then(|m| m.line.as_ref()).map(|l| l.unit_price),
            Some(12_000)
        );
    }

    #[test]
    fn only_settled_contributions_mark_paid() {
        let items = [
            item("i1", Some("p1"), Some("M"), None),
            item("i2", Some("p2"), Some("M"), None),
            item("i3", Some("p3"), Some("M"), None),
            item("i4", Some("p4"), Some("M"), None),
        ];

        let contributions = [
            contribution("p1", ContributionStatus::Completed),
            contribution("p2", ContributionStatus::Approved),
            contribution("p3", ContributionStatus::Pending),
        ];

        let members = normalize(
            RosterSource::Order {
                items: &items,
                submissions: &[],
                contributions: &contributions,
            },
            &JerseyDisplay::PlayerName,
        );

        let paid: Vec<bool> = members.iter().map(|m| m.paid).collect();

        assert_eq!(paid, [true, true, false, false]);
    }

    #[test]
    fn contributions_for_other_orders_do_not_count() {
        let items = [item("i1", Some("p1"), Some("M"), None)];
        let mut paid_elsewhere = contribution("p1", ContributionStatus::Completed);
        paid_elsewhere.order_id = "order-2".to_string();

        let members = normalize(
            RosterSource::Order {
                items: &items,
                submissions: &[],
                contributions: &[paid_elsewhere],
            },
            &JerseyDisplay::PlayerName,
        );

        assert_eq!(members.first().map(|m| m.paid), Some(false));
    }

    #[test]
    fn submission_is_matched_within_the_lines_order() {
        let mut line = item("i1", Some("p1"), None, None);
        line.order_id = "order-2".to_string();

        let mut second_order = submission("p1", "Ana Rojas", Some("L"), Some("8"));
        second_order.order_id = "order-2".to_string();

        let submissions = [submission("p1", "Ana", Some("S"), Some("10")), second_order];

        let members = normalize(
            RosterSource::Order {
                items: &[line],
                submissions: &submissions,
                contributions: &[],
            },
            &JerseyDisplay::PlayerName,
        );

        assert_eq!(members.first().and_then(|m| m.size.as_deref()), Some("L"));
        assert_eq!(members.first().and_then(|m| m.jersey_number.as_deref()), Some("8"));
        assert_eq!(members.first().map(|m| m.name.as_str()), Some("Ana Rojas"));
    }

    #[test]
    fn design_request_members_use_member_id_without_account() {
        let mut with_account = member("m2", "Bea", Some("L"), Some("4"));
        with_account.player_id = Some("p2".to_string());
        with_account.payment_paid = Some(true);

        let members = normalize(
            RosterSource::DesignRequest {
                members: &[member("m1", "Ana", None, Some("7")), with_account],
            },
            &JerseyDisplay::PlayerName,
        );

        let ids: Vec<&str> = members.iter().map(|m| m.player_id.as_str()).collect();
        let paid: Vec<bool> = members.iter().map(|m| m.paid).collect();

        assert_eq!(ids, ["m1", "p2"]);
        assert_eq!(paid, [false, true]);
        assert!(members.iter().all(|m| m.line.is_none()));
    }

    #[test]
    fn display_policy_only_changes_display_name() {
        let roster = [member("m1", "Ana", Some("M"), None), member("m2", "Bea", Some("L"), None)];
        let source = RosterSource::DesignRequest { members: &roster };

        let team = normalize(source, &JerseyDisplay::TeamName("Halcones".to_string()));
        let hidden = normalize(source, &JerseyDisplay::None);

        assert!(team.iter().all(|m| m.display_name == "Halcones"));
        assert!(hidden.iter().all(|m| m.display_name == HIDDEN_NAME));

        let names: Vec<&str> = team.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, ["Ana", "Bea"]);
    }

    #[test]
    fn display_sort_is_numeric_and_stable() {
        let roster = [
            member("m1", "Ana", None, Some("10")),
            member("m2", "Bea", None, None),
            member("m3", "Cata", None, Some("2")),
            member("m4", "Dani", None, Some("GK")),
            member("m5", "Eli", None, Some("0")),
        ];

        let mut members = normalize(
            RosterSource::DesignRequest { members: &roster },
            &JerseyDisplay::PlayerName,
        );

        sort_for_display(&mut members);

        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, ["Bea", "Dani", "Eli", "Cata", "Ana"]);
    }

    #[test]
    fn jersey_display_deserializes_from_policy() -> testresult::TestResult {
        let team: JerseyDisplay =
            serde_norway::from_str("{ policy: team_name, team_name: Halcones }")?;
        let none: JerseyDisplay = serde_norway::from_str("{ policy: none }")?;

        assert_eq!(team, JerseyDisplay::TeamName("Halcones".to_string()));
        assert_eq!(none, JerseyDisplay::None);

        Ok(())
    }
}
