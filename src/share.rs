use crate::models::ActivitySummary;
use crate::theme::stage_name;
use reqwest::Url;

const INTENT_URL: &str = "https://twitter.com/intent/tweet";

pub fn share_text(summary: &ActivitySummary) -> String {
    format!(
        "My commit garden is at the {} stage 🌱 {}-day streak and {} contributions this year. @{}'s garden:",
        stage_name(summary.stage),
        summary.streak,
        summary.total_last_year,
        summary.username,
    )
}

/// Compose intent for the share button. `page` links back to the garden when configured.
pub fn share_url(summary: &ActivitySummary, page: Option<&Url>) -> String {
    let text = share_text(summary);
    let mut params = vec![("text", text)];
    if let Some(page) = page {
        let mut link = page.clone();
        link.query_pairs_mut().clear().append_pair("user", &summary.username);
        params.push(("url", link.to_string()));
    }

    match Url::parse_with_params(INTENT_URL, &params) {
        Ok(url) => url.to_string(),
        Err(_) => INTENT_URL.to_string(),
    }
}
