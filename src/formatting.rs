// src/formatting.rs

use crate::core::{MonitoringCriteria, BOT_COMMANDS};
use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tipsport Bot Status</title>
    <link href="https://cdn.replit.com/agent/bootstrap-agent-dark-theme.min.css" rel="stylesheet">
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
        .status-card { border-radius: 8px; padding: 20px; margin-bottom: 20px; }
        .status-online { background-color: var(--bs-success-bg-subtle); border: 1px solid var(--bs-success-border-subtle); }
        .info-section { margin-top: 30px; }
        .criteria-box { background-color: var(--bs-dark-bg-subtle); border-radius: 8px; padding: 15px; margin-top: 15px; }
        .footer { margin-top: 40px; font-size: 0.9em; text-align: center; color: var(--bs-secondary-color); }
    </style>
</head>
"#;

/// Renders the human-readable status page at the given instant.
pub fn render_status_page<Tz>(criteria: &MonitoringCriteria, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let sports = join_sports(&criteria.sports);
    let last_checked = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let commands: String = BOT_COMMANDS
        .iter()
        .map(|cmd| {
            format!(
                "                <li><strong>{}</strong> - {}</li>\n",
                escape_html(cmd.name),
                escape_html(cmd.description)
            )
        })
        .collect();

    format!(
        r#"{head}<body>
    <div class="container">
        <h1 class="mt-4 mb-4">Tipsport Monitoring Bot</h1>

        <div class="status-card status-online">
            <h3 class="mb-3">Bot Status: <span class="text-success">Online</span></h3>
            <p>The Tipsport monitoring bot is currently running and checking for matches.</p>
            <p>Last checked: <span id="lastChecked">{last_checked}</span></p>
        </div>

        <div class="info-section">
            <h3>What This Bot Does</h3>
            <p>This bot monitors Tipsport for {sports_lower} matches where a team is winning by {goals}+ goals with odds of {odds} or higher. When it finds matches meeting these criteria, it sends notifications to your Telegram.</p>

            <div class="criteria-box">
                <h4>Monitoring Criteria:</h4>
                <ul>
                    <li>Sports: {sports}</li>
                    <li>Goal difference: {goals} or more goals</li>
                    <li>Odds: {odds} or higher</li>
                </ul>
            </div>
        </div>

        <div class="info-section">
            <h3>Bot Commands</h3>
            <p>You can interact with the bot on Telegram using these commands:</p>
            <ul>
{commands}            </ul>
        </div>

        <div class="footer">
            <p>Tipsport Monitoring Bot &copy; {year}</p>
        </div>
    </div>
</body>
</html>
"#,
        head = PAGE_HEAD,
        last_checked = escape_html(&last_checked),
        sports_lower = escape_html(&sports.to_lowercase()),
        sports = escape_html(&sports),
        goals = criteria.min_goal_difference,
        odds = criteria.min_odds,
        commands = commands,
        year = now.year(),
    )
}

/// Joins sport names as "A, B and C".
fn join_sports(sports: &[String]) -> String {
    match sports {
        [] => "all sports".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
