//! Static financial tips catalog
//!
//! Lookup never fails: an unknown (user type, topic) pair yields a single
//! motivational fallback line.

use crate::models::UserType;

pub const FALLBACK_TIP: &str = "Stay consistent with your finances!";

const TOPICS: &[&str] = &["Budgeting", "Investing"];

fn catalog(user_type: UserType, topic: &str) -> Option<&'static [&'static str]> {
    let tips: &'static [&'static str] = match (user_type, topic) {
        (UserType::Student, "Budgeting") => &[
            "Use the 50/30/20 rule",
            "Track every expense for a month",
            "Use student discounts",
        ],
        (UserType::Student, "Investing") => &[
            "Start with index funds",
            "Learn about compound interest",
            "Invest small but regularly",
        ],
        (UserType::Professional, "Budgeting") => &[
            "Automate savings",
            "Zero-based budgeting",
            "Track net worth monthly",
        ],
        (UserType::Professional, "Investing") => &[
            "Diversify portfolio",
            "Max out retirement accounts",
            "Rebalance quarterly",
        ],
        _ => return None,
    };
    Some(tips)
}

/// Topics with catalog entries, for the form dropdown
pub fn topics() -> &'static [&'static str] {
    TOPICS
}

/// Tips for a user type and topic as a header plus a numbered list
///
/// The topic is title-cased before lookup, so `budgeting` and `Budgeting`
/// give the same text. The user type must match exactly.
pub fn tips(user_type: &str, topic: &str) -> String {
    let topic = title_case(topic);
    let fallback: &[&str] = &[FALLBACK_TIP];
    let entries = UserType::all()
        .iter()
        .find(|ut| ut.as_str() == user_type)
        .and_then(|ut| catalog(*ut, &topic))
        .unwrap_or(fallback);

    let numbered = entries
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, tip))
        .collect::<Vec<_>>()
        .join("\n");

    format!("💡 {} Tips - {}:\n{}", user_type, topic, numbered)
}

/// Capitalize the first letter of every word and lowercase the rest
///
/// A "word" starts at any letter that does not follow another letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
