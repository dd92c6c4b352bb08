use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Motivation text stored for quick (email-only) signups. Entries carrying
/// this sentinel are counted as newsletter-only in the admin statistics.
pub const NEWSLETTER_SIGNUP_MOTIVATION: &str = "Newsletter signup";

/// Startup stage a registrant self-reports during the detailed signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Idea,
    Prototype,
    Mvp,
    Growth,
    Scale,
    Investor,
    Other,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Idea,
        Stage::Prototype,
        Stage::Mvp,
        Stage::Growth,
        Stage::Scale,
        Stage::Investor,
        Stage::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idea => "idea",
            Stage::Prototype => "prototype",
            Stage::Mvp => "mvp",
            Stage::Growth => "growth",
            Stage::Scale => "scale",
            Stage::Investor => "investor",
            Stage::Other => "other",
        }
    }
}

impl FromStr for Stage {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == raw)
            .ok_or(())
    }
}

/// Interest tags a registrant can pick in the detailed signup, plus the
/// `newsletter` tag reserved for quick signups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Funding,
    Networking,
    Mentorship,
    Partnerships,
    Learning,
    Pitching,
    Newsletter,
}

impl Interest {
    /// The tags offered by the detailed signup form. `newsletter` is not
    /// selectable there; it marks quick signups.
    pub const CATALOG: [Interest; 6] = [
        Interest::Funding,
        Interest::Networking,
        Interest::Mentorship,
        Interest::Partnerships,
        Interest::Learning,
        Interest::Pitching,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Funding => "funding",
            Interest::Networking => "networking",
            Interest::Mentorship => "mentorship",
            Interest::Partnerships => "partnerships",
            Interest::Learning => "learning",
            Interest::Pitching => "pitching",
            Interest::Newsletter => "newsletter",
        }
    }
}

impl FromStr for Interest {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "funding" => Ok(Interest::Funding),
            "networking" => Ok(Interest::Networking),
            "mentorship" => Ok(Interest::Mentorship),
            "partnerships" => Ok(Interest::Partnerships),
            "learning" => Ok(Interest::Learning),
            "pitching" => Ok(Interest::Pitching),
            "newsletter" => Ok(Interest::Newsletter),
            _ => Err(()),
        }
    }
}

/// A persisted waitlist registration. Immutable after insert; `email` is the
/// natural key and is unique across all entries.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub stage: Stage,
    pub motivation: String,
    pub interests: Vec<Interest>,
    pub newsletter: bool,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// True for entries created through the quick (email-only) path.
    pub fn is_newsletter_only(&self) -> bool {
        self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.motivation == NEWSLETTER_SIGNUP_MOTIVATION
    }
}

/// Insert payload for a new registration; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub stage: Stage,
    pub motivation: String,
    pub interests: Vec<Interest>,
    pub newsletter: bool,
}

impl NewWaitlistEntry {
    /// Minimal entry for the quick signup path: no names, sentinel
    /// motivation, the fixed `newsletter` tag, opted in.
    pub fn newsletter_only(email: String) -> Self {
        Self {
            email,
            first_name: String::new(),
            last_name: String::new(),
            company: None,
            role: None,
            stage: Stage::Other,
            motivation: NEWSLETTER_SIGNUP_MOTIVATION.to_string(),
            interests: vec![Interest::Newsletter],
            newsletter: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_round_trips_through_wire_names() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>(), Ok(stage));
        }
        assert!("seed".parse::<Stage>().is_err());
    }

    #[test]
    fn catalog_excludes_newsletter_tag() {
        assert!(!Interest::CATALOG.contains(&Interest::Newsletter));
        assert_eq!(Interest::CATALOG.len(), 6);
    }

    #[test]
    fn newsletter_only_entry_carries_sentinel() {
        let entry = NewWaitlistEntry::newsletter_only("a@b.com".into());
        assert_eq!(entry.motivation, NEWSLETTER_SIGNUP_MOTIVATION);
        assert_eq!(entry.interests, vec![Interest::Newsletter]);
        assert_eq!(entry.stage, Stage::Other);
        assert!(entry.newsletter);
        assert!(entry.first_name.is_empty() && entry.last_name.is_empty());
    }
}
