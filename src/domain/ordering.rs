//! Sibling ordering shared by both tree builders.
//!
//! Title ranks are an ordered rule table evaluated top to bottom: several
//! needles can match one title ("senior professional" also contains
//! "professional"), so the first matching rule decides.

use std::cmp::Ordering;

use crate::domain::entities::OrgNode;

/// Rank for titles no rule matches, and for empty titles.
pub const UNRANKED: u8 = 99;

struct TitleRule {
    rank: u8,
    needle: &'static str,
}

const TITLE_RULES: &[TitleRule] = &[
    TitleRule { rank: 1, needle: "chief" },
    TitleRule { rank: 2, needle: "head of" },
    TitleRule { rank: 3, needle: "team lead" },
    TitleRule { rank: 4, needle: "expert" },
    TitleRule { rank: 5, needle: "senior professional" },
    TitleRule { rank: 6, needle: "professional" },
    TitleRule { rank: 7, needle: "support" },
    TitleRule { rank: 8, needle: "staff" },
];

/// Seniority rank of a corporate title; lower sorts first.
pub fn title_rank(title: &str) -> u8 {
    let t = title.trim().to_lowercase();
    if t.is_empty() {
        return UNRANKED;
    }
    TITLE_RULES
        .iter()
        .find(|rule| t.contains(rule.needle))
        .map(|rule| rule.rank)
        .unwrap_or(UNRANKED)
}

pub fn is_assistant_role(position: &str) -> bool {
    let p = position.trim().to_lowercase();
    p.contains("assistant") || p.contains("secretary")
}

/// True for "CEO" or anything mentioning "chief executive officer".
pub fn is_ceo_title(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    t == "ceo" || t.contains("chief executive officer")
}

/// CEO check used for anchoring and suppression: position or corporate title.
pub fn is_ceo(node: &OrgNode) -> bool {
    is_ceo_title(&node.position) || is_ceo_title(&node.corporate_title)
}

/// Case-insensitive comparison with the raw text as tiebreak.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Corporate titles by rank, then by name.
pub fn compare_corporate_title(a: &str, b: &str) -> Ordering {
    title_rank(a)
        .cmp(&title_rank(b))
        .then_with(|| compare_names(a, b))
}

/// Report order: assistants and secretaries last, then title rank, then name.
///
/// The node id is the final tiebreak so the order is total.
pub fn compare_report_order(a: &OrgNode, b: &OrgNode) -> Ordering {
    is_assistant_role(&a.position)
        .cmp(&is_assistant_role(&b.position))
        .then_with(|| title_rank(&a.corporate_title).cmp(&title_rank(&b.corporate_title)))
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Mixed sibling order: containers first (by label), then employees in report order.
pub fn compare_siblings(a: &OrgNode, b: &OrgNode) -> Ordering {
    match (a.is_org_node, b.is_org_node) {
        (true, true) => compare_names(a.label(), b.label()).then_with(|| a.id.cmp(&b.id)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => compare_report_order(a, b),
    }
}

/// Recursively sort a forest with `compare`.
pub fn sort_forest(nodes: &mut [OrgNode], compare: fn(&OrgNode, &OrgNode) -> Ordering) {
    nodes.sort_by(compare);
    for node in nodes.iter_mut() {
        sort_forest(&mut node.children, compare);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_is_strictly_ordered() {
        let ranks: Vec<u8> = TITLE_RULES.iter().map(|r| r.rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_senior_professional_checked_before_professional() {
        assert_eq!(title_rank("Senior Professional"), 5);
        assert_eq!(title_rank("Professional"), 6);
    }
}
