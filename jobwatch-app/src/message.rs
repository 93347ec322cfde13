//! Notification text for one invocation.
use jobwatch_notify::Notification;
use jobwatch_web::{MatchCriteria, SiteCheck};

/// One line pair per matching site.
pub fn match_line(check: &SiteCheck, criteria: &MatchCriteria) -> String {
    format!(
        "✅ {} has new content mentioning {}!\n🔗 {}",
        check.site,
        criteria.display(),
        check.url
    )
}

/// Notification listing every matching site, in check order.
pub fn updates_found(criteria: &MatchCriteria, matches: &[&SiteCheck]) -> Notification {
    let display = criteria.display();
    let subject = format!(
        "🚀 {} Careers update found for {display} location(s)!",
        criteria.main_term_label()
    );
    let body = matches
        .iter()
        .map(|check| match_line(check, criteria))
        .collect::<Vec<_>>()
        .join("\n\n");
    Notification::new(subject, body)
}

/// Notification sent when nothing matched, carrying the quote of the day.
///
/// The body names the configured main term as the company (`in <main>
/// location(s)`) rather than a fixed company name, so watching another
/// employer yields a consistent message.
pub fn no_updates(criteria: &MatchCriteria, quote: &str) -> Notification {
    let display = criteria.display();
    let main = criteria.main_term_label();
    Notification::new(
        format!("😢 No updates on {main} Careers for location(s): {display}!"),
        format!(
            "No updates found for {display} in {main} location(s).... but nevertheless here your daily quote: {quote}"
        ),
    )
}
