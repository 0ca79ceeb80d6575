//! Shortcode substitution for transactional email templates.
//!
//! Templates are plain strings with `{shortcode}` placeholders. Known
//! shortcodes are substituted from a [`TemplateContext`]; anything else,
//! including stray braces, is left verbatim so template typos surface in
//! staging instead of silently vanishing.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::domain::foundation::Timestamp;

/// Every shortcode the template engine understands.
pub const SHORTCODES: [&str; 8] = [
    "name",
    "username",
    "email",
    "assessments",
    "expiration-date",
    "password",
    "dashboard-link",
    "year",
];

static KNOWN: Lazy<HashSet<&'static str>> = Lazy::new(|| SHORTCODES.into_iter().collect());

/// Values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub name: String,
    pub username: String,
    pub email: String,
    /// Comma-separated list of assessment names assigned to the user.
    pub assessments: String,
    /// Human-readable deadline, e.g. "2026-09-01".
    pub expiration_date: String,
    /// One-time initial password, empty when not applicable.
    pub password: String,
    /// Link to the user's dashboard.
    pub dashboard_link: String,
}

impl TemplateContext {
    fn lookup(&self, shortcode: &str, now: Timestamp) -> Option<String> {
        match shortcode {
            "name" => Some(self.name.clone()),
            "username" => Some(self.username.clone()),
            "email" => Some(self.email.clone()),
            "assessments" => Some(self.assessments.clone()),
            "expiration-date" => Some(self.expiration_date.clone()),
            "password" => Some(self.password.clone()),
            "dashboard-link" => Some(self.dashboard_link.clone()),
            "year" => Some(now.year().to_string()),
            _ => None,
        }
    }
}

/// Substitute every known `{shortcode}` in `template` from `ctx`.
///
/// Unknown shortcodes and unmatched braces pass through untouched.
pub fn render_template(template: &str, ctx: &TemplateContext) -> String {
    render_template_at(template, ctx, Timestamp::now())
}

/// As [`render_template`], with an explicit clock for `{year}`.
pub fn render_template_at(template: &str, ctx: &TemplateContext, now: Timestamp) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let candidate = &after_open[..close];
                if KNOWN.contains(candidate) {
                    // lookup never misses for a known shortcode
                    if let Some(value) = ctx.lookup(candidate, now) {
                        out.push_str(&value);
                    }
                } else {
                    out.push('{');
                    out.push_str(candidate);
                    out.push('}');
                }
                rest = &after_open[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx() -> TemplateContext {
        TemplateContext {
            name: "Jordan Reyes".into(),
            username: "jreyes".into(),
            email: "jordan@example.com".into(),
            assessments: "Leadership 360".into(),
            expiration_date: "2026-09-01".into(),
            password: "initial-pw".into(),
            dashboard_link: "https://app.example.com/dashboard".into(),
        }
    }

    fn fixed_now() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap())
    }

    #[test]
    fn substitutes_every_shortcode() {
        let template = "{name} {username} {email} {assessments} \
                        {expiration-date} {password} {dashboard-link} {year}";
        let rendered = render_template_at(template, &ctx(), fixed_now());
        assert_eq!(
            rendered,
            "Jordan Reyes jreyes jordan@example.com Leadership 360 \
             2026-09-01 initial-pw https://app.example.com/dashboard 2026"
        );
    }

    #[test]
    fn unknown_shortcodes_pass_through() {
        let rendered = render_template_at("Hello {nickname}!", &ctx(), fixed_now());
        assert_eq!(rendered, "Hello {nickname}!");
    }

    #[test]
    fn unmatched_brace_passes_through() {
        let rendered = render_template_at("Hello {name", &ctx(), fixed_now());
        assert_eq!(rendered, "Hello {name");
    }

    #[test]
    fn repeated_shortcodes_all_substitute() {
        let rendered = render_template_at("{name}, yes, {name}", &ctx(), fixed_now());
        assert_eq!(rendered, "Jordan Reyes, yes, Jordan Reyes");
    }

    #[test]
    fn template_without_shortcodes_is_unchanged() {
        let rendered = render_template_at("Plain body.", &ctx(), fixed_now());
        assert_eq!(rendered, "Plain body.");
    }

    #[test]
    fn empty_context_substitutes_empty_strings() {
        let rendered = render_template_at(
            "Hi {name}, pw: {password}.",
            &TemplateContext::default(),
            fixed_now(),
        );
        assert_eq!(rendered, "Hi , pw: .");
    }
}
