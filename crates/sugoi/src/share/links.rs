//! Absolute share links and the social card derived from a stored record.
//!
//! The total is computed here, at display time, from the persisted scores.

use serde::Serialize;
use url::Url;

use super::domain::Love;
use super::scoring::{self, ScoreBreakdown};

const OG_IMAGE_PATH: &str = "/api/og";
const X_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Resolve a share path against the public site URL.
pub fn share_url(site_url: &Url, share_path: &str) -> Url {
    let mut url = site_url.clone();
    url.set_path(share_path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Card heading: the comment when one was left, otherwise a sentence built from the total.
pub fn headline(love: &Love) -> String {
    match &love.comment {
        Some(comment) => comment.clone(),
        None => format!(
            "My love to {} is {}!",
            love.name,
            scoring::format_total(love.total())
        ),
    }
}

fn canonical_share_url(site_url: &Url, love: &Love) -> Url {
    match &love.share_path {
        Some(path) => share_url(site_url, path),
        None => share_url(site_url, &love.id.share_path()),
    }
}

/// Open Graph image link carrying the card type, heading, and share link.
pub fn og_image_url(site_url: &Url, love: &Love) -> Url {
    let link = canonical_share_url(site_url, love);
    let mut url = share_url(site_url, OG_IMAGE_PATH);
    url.query_pairs_mut()
        .append_pair("type", &love.name)
        .append_pair("heading", &headline(love))
        .append_pair("link", link.as_str());
    url
}

/// Tweet composer link for the record.
pub fn x_intent_url(site_url: &Url, love: &Love) -> Url {
    let link = canonical_share_url(site_url, love);
    let text = match &love.comment {
        Some(comment) => format!("I love {}, {}", love.name, comment),
        None => format!("I love {}", love.name),
    };

    let mut url = Url::parse(X_INTENT_URL).expect("static intent url parses");
    url.query_pairs_mut()
        .append_pair("text", &text)
        .append_pair("url", link.as_str());
    url
}

/// Public view of a shared record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCard {
    pub love: Love,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub headline: String,
    pub share_url: String,
    pub og_image_url: String,
    pub x_intent_url: String,
}

impl ShareCard {
    pub fn build(site_url: &Url, love: Love) -> Self {
        let breakdown = scoring::breakdown(&love.scores);
        Self {
            total: breakdown.total,
            breakdown,
            headline: headline(&love),
            share_url: canonical_share_url(site_url, &love).into(),
            og_image_url: og_image_url(site_url, &love).into(),
            x_intent_url: x_intent_url(site_url, &love).into(),
            love,
        }
    }
}
