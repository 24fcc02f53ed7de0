//! Resume Render Composer — turns a `ResumeRecord` into a self-contained HTML document.
//!
//! Sections are built as an ordered list of `(kind, body, visible)` entries and
//! rendered through a single page layout per mode. Missing fields never fail the
//! call; only a missing record does.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeRecord;
use crate::render::styles::stylesheet;

pub const DEFAULT_URL_TRUNCATE_THRESHOLD: usize = 60;

const NAME_PLACEHOLDER: &str = "No Name Provided";
const TITLE_PLACEHOLDER: &str = "Professional Resume";
const FALLBACK_TEXT: &str = "No additional information available.";
const EXPORT_SEPARATOR: &str = " | ";
const PRINT_INSTRUCTION: &str =
    "Print dialog will open automatically. If not, press Ctrl+P (Cmd+P on Mac).";

// ────────────────────────────────────────────────────────────────────────────
// Public types
// ────────────────────────────────────────────────────────────────────────────

/// Target of a render: on-screen browser printing or PDF file export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Print,
    Export,
}

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// LinkedIn URLs longer than this are shortened in export mode.
    pub url_truncate_threshold: usize,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            url_truncate_threshold: DEFAULT_URL_TRUNCATE_THRESHOLD,
        }
    }
}

/// Composed markup. Ephemeral: consumed by the exporter and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub mode: RenderMode,
    pub markup: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("no resume record was supplied")]
    MissingRecord,
}

// ────────────────────────────────────────────────────────────────────────────
// Section model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Education,
    Experience,
    Projects,
    Skills,
}

impl SectionKind {
    /// Canonical render order. Never derived from input.
    pub const ORDER: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Skills,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Education => "Education",
            SectionKind::Experience => "Professional Experience",
            SectionKind::Projects => "Projects Portfolio",
            SectionKind::Skills => "Core Skills",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody<'a> {
    Text(&'a str),
    Skills(Vec<&'a str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub body: SectionBody<'a>,
    pub visible: bool,
}

/// Builds all five sections in canonical order, marking which ones have content.
pub fn build_sections(record: &ResumeRecord) -> Vec<Section<'_>> {
    SectionKind::ORDER
        .iter()
        .map(|&kind| {
            let body = match kind {
                SectionKind::Summary => SectionBody::Text(present(&record.summary).unwrap_or("")),
                SectionKind::Education => {
                    SectionBody::Text(present(&record.education).unwrap_or(""))
                }
                SectionKind::Experience => {
                    SectionBody::Text(present(&record.experience).unwrap_or(""))
                }
                SectionKind::Projects => SectionBody::Text(present(&record.projects).unwrap_or("")),
                SectionKind::Skills => {
                    SectionBody::Skills(record.skills.as_deref().map(parse_skills).unwrap_or_default())
                }
            };
            let visible = match &body {
                SectionBody::Text(text) => !text.is_empty(),
                SectionBody::Skills(skills) => !skills.is_empty(),
            };
            Section {
                kind,
                body,
                visible,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the trimmed field if it has any non-whitespace content.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Splits a comma-separated skill string. Entries are trimmed and blank ones
/// dropped; order and duplicates are kept as supplied.
pub fn parse_skills(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shortens a URL longer than `threshold` to `threshold - 8` leading chars,
/// `"..."`, and the last 5 chars. Lengths are counted in chars.
pub fn truncate_url(url: &str, threshold: usize) -> Cow<'_, str> {
    let len = url.chars().count();
    if len <= threshold {
        return Cow::Borrowed(url);
    }
    let head: String = url.chars().take(threshold.saturating_sub(8)).collect();
    let tail: String = url.chars().skip(len.saturating_sub(5)).collect();
    Cow::Owned(format!("{head}...{tail}"))
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ────────────────────────────────────────────────────────────────────────────
// Contact line
// ────────────────────────────────────────────────────────────────────────────

/// Collects email, phone, address, linkedin (in that order), skipping blanks.
/// The second tuple element marks the LinkedIn entry.
fn contact_fields(record: &ResumeRecord) -> Vec<(&str, bool)> {
    [
        (present(&record.email), false),
        (present(&record.phone), false),
        (present(&record.address), false),
        (present(&record.linkedin), true),
    ]
    .into_iter()
    .filter_map(|(value, is_linkedin)| value.map(|v| (v, is_linkedin)))
    .collect()
}

/// Renders the contact line for a mode. Returns an empty string when no field is set.
pub fn contact_line(record: &ResumeRecord, mode: RenderMode, options: &ComposeOptions) -> String {
    let fields = contact_fields(record);
    match mode {
        RenderMode::Export => fields
            .into_iter()
            .map(|(value, is_linkedin)| {
                if is_linkedin {
                    escape_html(&truncate_url(value, options.url_truncate_threshold))
                } else {
                    escape_html(value)
                }
            })
            .collect::<Vec<_>>()
            .join(EXPORT_SEPARATOR),
        RenderMode::Print => fields
            .into_iter()
            .map(|(value, is_linkedin)| {
                let class = if is_linkedin {
                    "contact-item linkedin-url"
                } else {
                    "contact-item"
                };
                format!(r#"<span class="{class}">{}</span>"#, escape_html(value))
            })
            .collect::<Vec<_>>()
            .join(r#"<span class="contact-separator"> | </span>"#),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Markup assembly
// ────────────────────────────────────────────────────────────────────────────

fn render_section(section: &Section<'_>) -> String {
    let title = section.kind.title();
    let slug = section.kind.slug();
    let content = match &section.body {
        SectionBody::Text(text) => {
            format!(r#"<div class="section-content">{}</div>"#, escape_html(text))
        }
        SectionBody::Skills(skills) => {
            let pills = skills
                .iter()
                .map(|skill| format!(r#"<span class="skill-item">{}</span>"#, escape_html(skill)))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#"<div class="skills-list">{pills}</div>"#)
        }
    };
    format!(
        r#"<div class="section section-{slug}">
<div class="section-title">{title}</div>
{content}
</div>
"#
    )
}

fn render_sections(sections: &[Section<'_>]) -> String {
    let rendered: String = sections
        .iter()
        .filter(|s| s.visible)
        .map(render_section)
        .collect();
    if rendered.is_empty() {
        format!(
            r#"<div class="section section-empty">
<div class="section-content">{FALLBACK_TEXT}</div>
</div>
"#
        )
    } else {
        rendered
    }
}

/// Shared page layout. The mode decides the stylesheet and the print-only extras.
fn render_page(
    mode: RenderMode,
    css: &str,
    title: &str,
    name: &str,
    contact: &str,
    sections: &str,
) -> String {
    let (script, banner) = match mode {
        RenderMode::Print => (
            "<script>\nwindow.onload = function() { window.print(); };\n</script>\n",
            format!(r#"<div class="print-instruction">{PRINT_INSTRUCTION}</div>"#) + "\n",
        ),
        RenderMode::Export => ("", String::new()),
    };
    let contact_block = if contact.is_empty() {
        String::new()
    } else {
        format!("<div class=\"contact-info\">{contact}</div>\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
{css}</style>
{script}</head>
<body>
{banner}<div class="resume-header">
<div class="name">{name}</div>
{contact_block}</div>
{sections}</body>
</html>
"#
    )
}

/// Composes the full document for `record` in `mode`.
///
/// Fails only when `record` is `None`. A record with neither name nor email
/// still renders, under a placeholder name.
pub fn compose(
    record: Option<&ResumeRecord>,
    mode: RenderMode,
    options: &ComposeOptions,
) -> Result<RenderedDocument, ComposeError> {
    let record = record.ok_or(ComposeError::MissingRecord)?;

    let full_name = present(&record.full_name);
    if full_name.is_none() && present(&record.email).is_none() {
        debug!(resume_id = %record.id, "composing resume without name or email");
    }

    let name = escape_html(full_name.unwrap_or(NAME_PLACEHOLDER));
    let title = match full_name {
        Some(n) => format!("Resume - {}", escape_html(n)),
        None => TITLE_PLACEHOLDER.to_string(),
    };
    let contact = contact_line(record, mode, options);
    let sections = render_sections(&build_sections(record));
    let css = stylesheet(mode, record.template_type);

    let markup = render_page(mode, &css, &title, &name, &contact, &sections);
    debug!(resume_id = %record.id, ?mode, bytes = markup.len(), "resume composed");

    Ok(RenderedDocument { mode, markup })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResumeRecord {
        ResumeRecord::new("r-1")
    }

    fn export(record: &ResumeRecord) -> String {
        compose(Some(record), RenderMode::Export, &ComposeOptions::default())
            .unwrap()
            .markup
    }

    fn title_pos(markup: &str, kind: SectionKind) -> Option<usize> {
        markup.find(&format!(r#"<div class="section-title">{}</div>"#, kind.title()))
    }

    // ── parse_skills ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_skills_drops_blanks_keeps_order() {
        assert_eq!(parse_skills("A, B, ,C ,"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_skills_keeps_duplicates() {
        assert_eq!(parse_skills("A, A"), vec!["A", "A"]);
        assert!(parse_skills(" , ,").is_empty());
    }

    // ── truncate_url ─────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_long_url() {
        let url: String = (0..100).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let out = truncate_url(&url, 60);
        assert_eq!(out.chars().count(), 60);
        assert_eq!(&out[..52], &url[..52]);
        assert_eq!(&out[52..55], "...");
        assert_eq!(&out[55..], &url[95..]);
    }

    #[test]
    fn test_short_url_untouched() {
        let url = "x".repeat(50);
        assert!(matches!(truncate_url(&url, 60), Cow::Borrowed(_)));
        let exact = "y".repeat(60);
        assert_eq!(truncate_url(&exact, 60), exact);
    }

    #[test]
    fn test_truncate_counts_chars() {
        let url = "ü".repeat(70);
        let out = truncate_url(&url, 60);
        assert_eq!(out.chars().count(), 60);
    }

    // ── compose ──────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_record_is_error() {
        let err = compose(None, RenderMode::Print, &ComposeOptions::default()).unwrap_err();
        assert_eq!(err, ComposeError::MissingRecord);
    }

    #[test]
    fn test_empty_resume_gets_fallback_block() {
        for mode in [RenderMode::Print, RenderMode::Export] {
            let markup = compose(Some(&record()), mode, &ComposeOptions::default())
                .unwrap()
                .markup;
            assert!(markup.contains(FALLBACK_TEXT));
            assert!(!markup.contains(r#"class="section-title""#));
            assert!(markup.contains(NAME_PLACEHOLDER));
            assert!(markup.contains(TITLE_PLACEHOLDER));
            assert!(!markup.contains(r#"class="contact-info""#));
        }
    }

    #[test]
    fn test_whitespace_only_fields_are_absent() {
        let mut r = record();
        r.summary = Some("   \n\t".to_string());
        r.skills = Some(" , ,".to_string());
        r.email = Some("  ".to_string());
        let markup = export(&r);
        assert!(markup.contains(FALLBACK_TEXT));
        assert!(!markup.contains(r#"class="contact-info""#));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let mut r = record();
        r.skills = Some("Rust".to_string());
        r.projects = Some("P".to_string());
        r.experience = Some("E".to_string());
        r.education = Some("Ed".to_string());
        r.summary = Some("S".to_string());
        for mode in [RenderMode::Print, RenderMode::Export] {
            let markup = compose(Some(&r), mode, &ComposeOptions::default())
                .unwrap()
                .markup;
            let positions: Vec<usize> = SectionKind::ORDER
                .iter()
                .map(|k| title_pos(&markup, *k).expect("section present"))
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
            assert!(!markup.contains(FALLBACK_TEXT));
        }
    }

    #[test]
    fn test_end_to_end_export() {
        let mut r = record();
        r.full_name = Some("Jane Doe".to_string());
        r.email = Some("j@x.com".to_string());
        r.skills = Some("Python, Go".to_string());
        let markup = export(&r);

        assert!(markup.contains(r#"<div class="name">Jane Doe</div>"#));
        assert!(markup.contains(r#"<div class="contact-info">j@x.com</div>"#));
        assert!(markup.contains(
            r#"<span class="skill-item">Python</span> <span class="skill-item">Go</span>"#
        ));
        assert!(title_pos(&markup, SectionKind::Skills).is_some());
        for kind in [
            SectionKind::Summary,
            SectionKind::Education,
            SectionKind::Experience,
            SectionKind::Projects,
        ] {
            assert!(title_pos(&markup, kind).is_none(), "{kind:?} should be absent");
        }
        assert!(!markup.contains("window.print()"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let mut r = record();
        r.full_name = Some("Jane Doe".to_string());
        r.experience = Some("Line one\nLine two".to_string());
        for mode in [RenderMode::Print, RenderMode::Export] {
            let a = compose(Some(&r), mode, &ComposeOptions::default()).unwrap();
            let b = compose(Some(&r), mode, &ComposeOptions::default()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_line_breaks_preserved() {
        let mut r = record();
        r.education = Some("BSc, 2019\nMSc, 2021".to_string());
        let markup = export(&r);
        assert!(markup.contains("BSc, 2019\nMSc, 2021"));
    }

    #[test]
    fn test_contact_line_export_skips_missing_without_stray_separators() {
        let mut r = record();
        r.email = Some("a@b.c".to_string());
        r.address = Some("Berlin".to_string());
        let line = contact_line(&r, RenderMode::Export, &ComposeOptions::default());
        assert_eq!(line, "a@b.c | Berlin");
    }

    #[test]
    fn test_contact_line_order() {
        let mut r = record();
        r.linkedin = Some("https://linkedin.com/in/jane".to_string());
        r.address = Some("Berlin".to_string());
        r.phone = Some("555".to_string());
        r.email = Some("a@b.c".to_string());
        let line = contact_line(&r, RenderMode::Export, &ComposeOptions::default());
        assert_eq!(line, "a@b.c | 555 | Berlin | https://linkedin.com/in/jane");
    }

    #[test]
    fn test_linkedin_truncated_only_in_export() {
        let url = format!("https://www.linkedin.com/in/{}", "z".repeat(72));
        assert_eq!(url.len(), 100);
        let mut r = record();
        r.linkedin = Some(url.clone());
        let opts = ComposeOptions::default();

        let export_line = contact_line(&r, RenderMode::Export, &opts);
        assert_eq!(export_line, truncate_url(&url, 60));
        assert_eq!(export_line.len(), 60);

        let print_line = contact_line(&r, RenderMode::Print, &opts);
        assert!(print_line.contains(&url));
        assert!(print_line.contains(r#"class="contact-item linkedin-url""#));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut r = record();
        r.linkedin = Some("x".repeat(50));
        let opts = ComposeOptions {
            url_truncate_threshold: 20,
        };
        let line = contact_line(&r, RenderMode::Export, &opts);
        assert_eq!(line, format!("{}...{}", "x".repeat(12), "x".repeat(5)));
    }

    #[test]
    fn test_print_mode_has_auto_print_and_spans() {
        let mut r = record();
        r.email = Some("a@b.c".to_string());
        r.phone = Some("555".to_string());
        let markup = compose(Some(&r), RenderMode::Print, &ComposeOptions::default())
            .unwrap()
            .markup;
        assert!(markup.contains("window.print()"));
        assert!(markup.contains(PRINT_INSTRUCTION));
        assert!(markup.contains(
            r#"<span class="contact-item">a@b.c</span><span class="contact-separator"> | </span><span class="contact-item">555</span>"#
        ));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut r = record();
        r.full_name = Some("<script>alert(1)</script>".to_string());
        r.skills = Some("C & C++, <b>".to_string());
        let markup = export(&r);
        assert!(!markup.contains("<script>alert"));
        assert!(markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(markup.contains(r#"<span class="skill-item">C &amp; C++</span>"#));
        assert!(markup.contains(r#"<span class="skill-item">&lt;b&gt;</span>"#));
    }

    #[test]
    fn test_email_only_identity_uses_placeholder_name() {
        let mut r = record();
        r.email = Some("solo@x.com".to_string());
        let markup = export(&r);
        assert!(markup.contains(NAME_PLACEHOLDER));
        assert!(markup.contains("solo@x.com"));
    }

    #[test]
    fn test_section_titles() {
        let titles: Vec<&str> = SectionKind::ORDER.iter().map(|k| k.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Professional Summary",
                "Education",
                "Professional Experience",
                "Projects Portfolio",
                "Core Skills",
            ]
        );

        let mut r = record();
        r.experience = Some("E".to_string());
        r.skills = Some("Rust".to_string());
        let markup = export(&r);
        assert!(markup.contains(r#"<div class="section-title">Professional Experience</div>"#));
        assert!(markup.contains(r#"<div class="section-title">Core Skills</div>"#));
    }

    #[test]
    fn test_build_sections_marks_visibility() {
        let mut r = record();
        r.projects = Some("  Compiler  ".to_string());
        let sections = build_sections(&r);
        assert_eq!(sections.len(), 5);
        let visible: Vec<SectionKind> =
            sections.iter().filter(|s| s.visible).map(|s| s.kind).collect();
        assert_eq!(visible, vec![SectionKind::Projects]);
        assert_eq!(sections[3].body, SectionBody::Text("Compiler"));
    }
}
