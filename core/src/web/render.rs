//! Server-side HTML for the login page and the three dashboard tabs.
//!
//! Every string that comes from the database or the request goes through
//! `escape_html` before it is written into markup.

use crate::{
    dashboard::PROLIFIC_ALBUM_THRESHOLD,
    reports::{
        Account, ArtistReport, ArtistSummary, ListenerReport, ListeningTime, NamedCount,
        OverviewReport,
    },
};
use serde::Deserialize;
use std::fmt::Write;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Artists,
    Me,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Overview, Tab::Artists, Tab::Me];

    fn slug(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Artists => "artists",
            Tab::Me => "me",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Artists => "Artists",
            Tab::Me => "My analysis",
        }
    }
}

pub fn escape_html(s: &str) -> String {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/assets/styles/app.css\">\n\
         </head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

// ── Login ───────────────────────────────────────────────────────────────────

pub fn login_page(error: Option<&str>, username: &str) -> String {
    let error_html = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape_html(e)))
        .unwrap_or_default();
    let body = format!(
        "<div class=\"login-container\">\n\
         <h1 class=\"form-title\">Streaming Dashboard</h1>\n\
         <p class=\"form-subtitle\">Sign in to see your analysis and the catalog overview.</p>\n\
         {error_html}\n\
         <form method=\"post\" action=\"/login\">\n\
         <label for=\"username\">Username:</label>\n\
         <input id=\"username\" name=\"username\" value=\"{}\" placeholder=\"Your user or artist name\">\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>\n\
         <p class=\"info\">Login only asks for a username.</p>\n\
         </div>",
        escape_html(username)
    );
    page("Login - Streaming Dashboard", &body)
}

// ── Dashboard shell ─────────────────────────────────────────────────────────

pub fn dashboard_page(account: &Account, tab: Tab, content: &str) -> String {
    let mut tabs = String::from("<nav class=\"tabs\">");
    for t in Tab::ALL {
        let class = if t == tab { " class=\"active\"" } else { "" };
        let _ = write!(
            tabs,
            "<a href=\"/dashboard?tab={}\"{class}>{}</a>",
            t.slug(),
            t.title()
        );
    }
    tabs.push_str("</nav>");

    let body = format!(
        "<header>\n<h4 class=\"logged-in\">Logged in as: {}</h4>\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>\n\
         </header>\n\
         <h1 class=\"main-title\">Streaming Analytics Dashboard</h1>\n\
         {tabs}\n<section class=\"content-box\">\n{content}\n</section>\n\
         <hr>\n<p class=\"footer\">Streaming Analytics Dashboard</p>",
        escape_html(&account.username)
    );
    page("Streaming Analytics Dashboard", &body)
}

// ── Overview tab ────────────────────────────────────────────────────────────

pub fn overview_tab(report: &OverviewReport) -> String {
    let t = &report.totals;
    let mut html = String::from("<h2>Overview</h2>\n<div class=\"tiles\">");
    html.push_str(&tile("Songs", &t.songs.to_string()));
    html.push_str(&tile("Artists", &t.artists.to_string()));
    html.push_str(&tile("Albums", &t.albums.to_string()));
    html.push_str(&tile("Podcasts", &t.podcasts.to_string()));
    html.push_str(&tile("Episodes", &t.episodes.to_string()));
    html.push_str(&tile(
        "Podcast runtime",
        &ListeningTime::from_seconds(t.episode_runtime_secs).to_string(),
    ));
    html.push_str("</div>\n");

    let top_songs: Vec<(String, i64)> = report
        .top_songs
        .iter()
        .map(|s| (format!("{} ({})", s.song, s.album), s.total_plays))
        .collect();
    html.push_str(&bar_chart("Top 5 most played songs", &top_songs));
    html.push_str(&named_count_table(
        "Albums with the most tracks",
        "Album",
        "Tracks",
        &report.albums_by_track_count,
    ));
    html.push_str(&bar_chart(
        "Most saved albums",
        &as_pairs(&report.most_saved_albums),
    ));
    html.push_str(&bar_chart(
        "Most followed podcasts",
        &as_pairs(&report.most_followed_podcasts),
    ));

    let _ = write!(
        html,
        "<h3>Artists with more than {PROLIFIC_ALBUM_THRESHOLD} albums</h3>\n{}",
        name_list(&report.prolific_album_artists)
    );

    let most_songs: Vec<String> = report
        .artists_with_most_songs
        .iter()
        .map(|a| format!("{} ({} songs)", a.name, a.count))
        .collect();
    let _ = write!(
        html,
        "<h3>Artist with the most published songs</h3>\n{}",
        name_list(&most_songs)
    );

    let most_followed = report
        .most_followed_artist
        .as_ref()
        .map(|a| format!("{} ({} followers)", a.name, a.count))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let _ = write!(
        html,
        "<h3>Most followed artist</h3>\n<p>{}</p>",
        escape_html(&most_followed)
    );
    html
}

// ── Artists tab ─────────────────────────────────────────────────────────────

pub fn artists_tab(artists: &[ArtistSummary], report: Option<&ArtistReport>) -> String {
    let selected = report.map(|r| r.artist.id);
    let mut html = String::from(
        "<h2>Artist analysis</h2>\n<form method=\"get\" action=\"/dashboard\">\n\
         <input type=\"hidden\" name=\"tab\" value=\"artists\">\n\
         <select name=\"artist_id\">",
    );
    for a in artists {
        let sel = if Some(a.id) == selected { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{sel}>{}</option>",
            a.id,
            escape_html(&a.name)
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>\n");

    let Some(report) = report else {
        if artists.is_empty() {
            html.push_str("<p>No artists in the catalog.</p>");
        } else {
            html.push_str("<p>Pick an artist.</p>");
        }
        return html;
    };

    let _ = write!(html, "<h3>{}</h3>\n<div class=\"tiles\">", escape_html(&report.artist.name));
    html.push_str(&tile("Followers", &report.stats.followers.to_string()));
    html.push_str(&tile("Albums", &report.stats.albums.to_string()));
    html.push_str(&tile("Songs", &report.stats.songs.to_string()));
    html.push_str(&tile(
        "Most saved album",
        &report
            .most_saved_album
            .as_ref()
            .map(|a| format!("{} ({} saves)", a.name, a.count))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ));
    html.push_str("</div>\n");
    html.push_str(&bar_chart(
        "Top 3 most played songs",
        &as_pairs(&report.top_songs),
    ));
    html
}

// ── Listener tab ────────────────────────────────────────────────────────────

pub fn listener_tab(report: &ListenerReport) -> String {
    let mut html = format!(
        "<h2>Analysis of {}</h2>\n<h3>Your personal statistics</h3>\n<div class=\"tiles\">",
        escape_html(&report.account.display_name)
    );
    html.push_str(&tile(
        "Songs listened to",
        &report.distinct_songs_played.to_string(),
    ));
    html.push_str(&tile("Hours listening", &report.listening_time.to_string()));
    html.push_str(&tile("Favorite artist", label_or_na(&report.favorite_artist)));
    html.push_str(&tile("Favorite genre", label_or_na(&report.favorite_album_genre)));
    html.push_str(&tile(
        "Favorite podcast genre",
        label_or_na(&report.favorite_podcast_genre),
    ));
    html.push_str(&tile("Top song", label_or_na(&report.top_song)));
    html.push_str(&tile("Top episode", label_or_na(&report.top_episode)));
    html.push_str("</div>\n<hr>\n");
    html.push_str(&bar_chart(
        "Your 5 most played songs",
        &as_pairs(&report.top_songs),
    ));
    html
}

// ── Building blocks ─────────────────────────────────────────────────────────

fn label_or_na(value: &Option<NamedCount>) -> &str {
    value.as_ref().map(|v| v.name.as_str()).unwrap_or(NOT_AVAILABLE)
}

fn as_pairs(rows: &[NamedCount]) -> Vec<(String, i64)> {
    rows.iter().map(|r| (r.name.clone(), r.count)).collect()
}

fn tile(label: &str, value: &str) -> String {
    format!(
        "<div class=\"tile\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
        escape_html(label),
        escape_html(value)
    )
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        return format!("<p>{NOT_AVAILABLE}</p>\n");
    }
    let mut html = String::from("<ul>");
    for n in names {
        let _ = write!(html, "<li>{}</li>", escape_html(n));
    }
    html.push_str("</ul>\n");
    html
}

fn named_count_table(title: &str, name_header: &str, count_header: &str, rows: &[NamedCount]) -> String {
    let mut html = format!("<h3>{}</h3>\n", escape_html(title));
    if rows.is_empty() {
        html.push_str("<p>No data.</p>\n");
        return html;
    }
    let _ = write!(
        html,
        "<table><tr><th>{}</th><th>{}</th></tr>",
        escape_html(name_header),
        escape_html(count_header)
    );
    for r in rows {
        let _ = write!(html, "<tr><td>{}</td><td>{}</td></tr>", escape_html(&r.name), r.count);
    }
    html.push_str("</table>\n");
    html
}

/// Horizontal bar chart; bar widths are relative to the largest value.
fn bar_chart(title: &str, rows: &[(String, i64)]) -> String {
    let mut html = format!("<h3>{}</h3>\n", escape_html(title));
    if rows.is_empty() {
        html.push_str("<p>No data.</p>\n");
        return html;
    }
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    html.push_str("<div class=\"chart\">");
    for (label, value) in rows {
        let width = (*value).max(0) * 100 / max;
        let _ = write!(
            html,
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <span class=\"bar\" style=\"width:{width}%\"></span>\
             <span class=\"bar-value\">{value}</span></div>",
            escape_html(label)
        );
    }
    html.push_str("</div>\n");
    html
}
