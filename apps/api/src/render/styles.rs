//! Style profiles for the two render modes.
//!
//! Both profiles pin the page box to A4 with 1" margins and keep each section
//! on a single page when paginated. Export is the denser of the two and carries
//! no screen-only rules; print keeps the decorative header and an on-screen
//! instruction banner that disappears under `@media print`.

use crate::models::resume::TemplateType;
use crate::render::compose::RenderMode;

/// Accent colour for headers, rules and skill pills.
pub fn accent_color(template: TemplateType) -> &'static str {
    match template {
        TemplateType::Modern => "#3498db",
        TemplateType::Classic => "#2c3e50",
        TemplateType::Creative => "#8e44ad",
        TemplateType::Minimal => "#555555",
    }
}

/// Full stylesheet for a mode and template.
pub fn stylesheet(mode: RenderMode, template: TemplateType) -> String {
    let accent = accent_color(template);
    match mode {
        RenderMode::Print => print_stylesheet(accent),
        RenderMode::Export => export_stylesheet(accent),
    }
}

fn print_stylesheet(accent: &str) -> String {
    format!(
        r#"@page {{
    size: A4;
    margin: 1in;
}}
@media print {{
    body {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}
    .print-instruction {{ display: none; }}
}}
body {{
    font-family: 'Segoe UI', Arial, sans-serif;
    font-size: 12pt;
    line-height: 1.5;
    color: #2c3e50;
    margin: 20px auto;
    max-width: 8.5in;
}}
.print-instruction {{
    text-align: center;
    margin: 20px 0;
    font-size: 12pt;
    color: #7f8c8d;
}}
.resume-header {{
    text-align: center;
    border-bottom: 3px solid {accent};
    padding-bottom: 18px;
    margin-bottom: 30px;
}}
.name {{
    font-size: 28pt;
    font-weight: bold;
    color: {accent};
    margin-bottom: 8px;
}}
.contact-info {{
    font-size: 11pt;
    color: #7f8c8d;
    word-wrap: break-word;
    overflow-wrap: anywhere;
    white-space: normal;
}}
.contact-item {{
    display: inline-block;
    max-width: 100%;
    vertical-align: top;
    overflow-wrap: anywhere;
}}
.contact-separator {{
    color: #bdc3c7;
}}
.linkedin-url {{
    word-break: break-all;
    overflow-wrap: break-word;
}}
.section {{
    margin-bottom: 28px;
    page-break-inside: avoid;
    break-inside: avoid;
}}
.section-title {{
    font-size: 16pt;
    font-weight: bold;
    color: #2c3e50;
    border-left: 6px solid {accent};
    background-color: #ecf0f1;
    padding: 10px 16px;
    margin-bottom: 14px;
    text-transform: uppercase;
    letter-spacing: 1px;
}}
.section-content {{
    margin-left: 10px;
    text-align: justify;
    white-space: pre-wrap;
    line-height: 1.6;
}}
.section-summary .section-content {{
    font-style: italic;
    color: #34495e;
}}
.skills-list {{
    margin-left: 10px;
    line-height: 2;
}}
.skill-item {{
    background-color: {accent};
    color: white;
    padding: 6px 14px;
    margin: 3px;
    border-radius: 15px;
    font-size: 10pt;
    font-weight: 600;
    display: inline-block;
}}
"#
    )
}

fn export_stylesheet(accent: &str) -> String {
    format!(
        r#"@page {{
    size: A4;
    margin: 1in;
}}
body {{
    font-family: Arial, sans-serif;
    font-size: 10pt;
    line-height: 1.4;
    color: #333333;
    margin: 0;
    padding: 0;
}}
.resume-header {{
    text-align: center;
    border-bottom: 2px solid {accent};
    padding-bottom: 12px;
    margin-bottom: 18px;
}}
.name {{
    font-size: 22pt;
    font-weight: bold;
    color: {accent};
    margin-bottom: 5px;
}}
.contact-info {{
    font-size: 9pt;
    color: #7f8c8d;
}}
.section {{
    margin-bottom: 14px;
    page-break-inside: avoid;
    break-inside: avoid;
}}
.section-title {{
    font-size: 12pt;
    font-weight: bold;
    color: #2c3e50;
    border-bottom: 1px solid #bdc3c7;
    padding-bottom: 3px;
    margin-bottom: 8px;
    text-transform: uppercase;
    letter-spacing: 1px;
}}
.section-content {{
    margin-left: 8px;
    text-align: justify;
    white-space: pre-wrap;
}}
.section-summary .section-content {{
    font-style: italic;
}}
.skills-list {{
    margin-left: 8px;
}}
.skill-item {{
    background-color: #ecf0f1;
    border: 1px solid {accent};
    color: #2c3e50;
    padding: 3px 10px;
    margin: 2px;
    border-radius: 12px;
    font-size: 8.5pt;
    display: inline-block;
}}
"#
    )
}
