//! About-us rendering.

use std::fmt::Write;

use tessera_site::AboutUsData;

use crate::dispatch::resolve_style;
use crate::escape::escape_html;

const STYLES: &[&str] = &["default", "team"];

pub(crate) fn render(data: &AboutUsData, style: Option<&str>, out: &mut String) {
    let style = resolve_style(STYLES, style);

    write!(out, r#"<section class="about about-{style}">"#).unwrap();
    write!(out, "<h2>{}</h2>", escape_html(&data.heading)).unwrap();
    if !data.body.is_empty() {
        write!(out, "<p>{}</p>", escape_html(&data.body)).unwrap();
    }

    if !data.stats.is_empty() {
        out.push_str(r#"<dl class="about-stats">"#);
        for stat in &data.stats {
            write!(
                out,
                "<div><dt>{}</dt><dd>{}</dd></div>",
                escape_html(&stat.label),
                escape_html(&stat.value)
            )
            .unwrap();
        }
        out.push_str("</dl>");
    }

    if style == "team" && !data.members.is_empty() {
        out.push_str(r#"<div class="about-team">"#);
        for member in &data.members {
            out.push_str(r#"<figure class="team-member">"#);
            if !member.photo_url.is_empty() {
                write!(
                    out,
                    r#"<img src="{}" alt="{}">"#,
                    escape_html(&member.photo_url),
                    escape_html(&member.name)
                )
                .unwrap();
            }
            write!(
                out,
                "<figcaption>{}<span>{}</span></figcaption>",
                escape_html(&member.name),
                escape_html(&member.role)
            )
            .unwrap();
            out.push_str("</figure>");
        }
        out.push_str("</div>");
    }

    out.push_str("</section>");
}

#[cfg(test)]
mod tests {
    use tessera_site::{Stat, TeamMember};

    use super::*;

    #[test]
    fn test_default_renders_stats() {
        let data = AboutUsData {
            stats: vec![Stat {
                id: "s1".to_owned(),
                label: "Customers".to_owned(),
                value: "1200".to_owned(),
            }],
            ..AboutUsData::default()
        };
        let mut out = String::new();
        render(&data, None, &mut out);

        assert!(out.contains("<dt>Customers</dt>"));
        assert!(out.contains("<dd>1200</dd>"));
    }

    #[test]
    fn test_team_style_renders_members() {
        let data = AboutUsData {
            members: vec![TeamMember {
                id: "m1".to_owned(),
                name: "Sam".to_owned(),
                role: "Founder".to_owned(),
                photo_url: String::new(),
            }],
            ..AboutUsData::default()
        };
        let mut out = String::new();
        render(&data, Some("team"), &mut out);

        assert!(out.contains("team-member"));
        assert!(out.contains("Sam"));
    }

    #[test]
    fn test_default_style_omits_members() {
        let data = AboutUsData {
            members: vec![TeamMember {
                id: "m1".to_owned(),
                name: "Sam".to_owned(),
                role: "Founder".to_owned(),
                photo_url: String::new(),
            }],
            ..AboutUsData::default()
        };
        let mut out = String::new();
        render(&data, None, &mut out);

        assert!(!out.contains("about-team"));
    }
}
