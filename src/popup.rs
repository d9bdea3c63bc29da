//! Map markers and venue popups, in the front-end's German wording.

use chrono::Datelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::grouping::GroupedMatches;
use crate::model::{Match, Venue};
use crate::query::MatchLocation;

const WEEKDAYS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

/// Display strings for one match card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMatch {
    /// "Sa, 30.08."
    pub date: String,
    /// "14:00 Uhr"
    pub time: String,
    /// "<age group> | <competition>"
    pub header: String,
    pub home: String,
    pub away: String,
}

pub fn format_match(m: &Match, zone: Tz) -> FormattedMatch {
    let (date, time) = match m.time {
        Some(t) => {
            let local = t.with_timezone(&zone);
            let weekday = WEEKDAYS[local.weekday().num_days_from_monday() as usize];
            (
                format!("{}, {}", weekday, local.format("%d.%m.")),
                local.format("%H:%M Uhr").to_string(),
            )
        }
        None => (String::new(), String::new()),
    };

    let age = m.age_group.as_ref().and_then(|a| a.name.as_deref()).unwrap_or("");
    let comp = m.competition.as_ref().and_then(|c| c.name.as_deref()).unwrap_or("");
    let header = [age, comp]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join(" | ");

    let team_name = |team: &Option<crate::model::Team>, fallback: &str| {
        team.as_ref()
            .and_then(|t| t.name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    FormattedMatch {
        date,
        time,
        header,
        home: team_name(&m.home_team, "Heim unbekannt"),
        away: team_name(&m.away_team, "Gast unbekannt"),
    }
}

/// Sort by kickoff; matches without one always go last.
pub fn sort_chronologically(matches: &mut [Match], descending: bool) {
    matches.sort_by(|a, b| match (a.time, b.time) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
    });
}

/// Popup listing for one venue. Past matches are shown latest first.
pub fn build_popup_html(group: &GroupedMatches, venue: Option<&Venue>, zone: Tz) -> String {
    let mut past = group.past.clone();
    sort_chronologically(&mut past, true);

    let address = venue
        .and_then(|v| v.address.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or("Spielort");
    let count = group.len();
    let noun = if count == 1 { "Spiel" } else { "Spiele" };

    let mut html = String::from("<div class=\"match-popup\">");
    html.push_str(&format!("<h3>{} ({} {})</h3>", escape_html(address), count, noun));
    push_section(&mut html, "Heute", &group.today, zone);
    push_section(&mut html, "Nächste Spiele", &group.upcoming, zone);
    push_section(&mut html, "Letzte Spiele", &past, zone);
    html.push_str("</div>");
    html
}

fn push_section(html: &mut String, title: &str, matches: &[Match], zone: Tz) {
    if matches.is_empty() {
        return;
    }
    html.push_str(&format!("<h4 class=\"group\">{} ({})</h4><ul class=\"matches match-cards\">", title, matches.len()));
    for m in matches {
        let bits = format_match(m, zone);
        let (open, close) = match m.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => (
                format!("<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">", escape_html(url)),
                "</a>",
            ),
            None => (String::new(), ""),
        };
        html.push_str(&format!(
            "<li class=\"match-card\">{}<div class=\"match-header\">{}</div>\
             <div class=\"match-line\"><span class=\"team home\">{}</span><span class=\"date\">{}</span></div>\
             <div class=\"match-line\"><span class=\"team away\">{}</span><span class=\"time\">{}</span></div>{}</li>",
            open,
            escape_html(&bits.header),
            escape_html(&bits.home),
            escape_html(&bits.date),
            escape_html(&bits.away),
            escape_html(&bits.time),
            close,
        ));
    }
    html.push_str("</ul>");
}

pub const LOADING_POPUP_HTML: &str =
    "<div class=\"match-popup loading\"><p>Lade Spiele…</p></div>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub popup_html: String,
}

/// One marker per location that can be placed on the map.
///
/// Popups start as a loading placeholder; the venue's matches are fetched when
/// the marker is opened.
pub fn build_markers(locations: &[MatchLocation]) -> Vec<Marker> {
    locations
        .iter()
        .filter_map(|l| l.venue.position())
        .map(|(id, lat, lng)| Marker { id, lat, lng, popup_html: LOADING_POPUP_HTML.to_string() })
        .collect()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
