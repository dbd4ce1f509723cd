//! Themed SVG profile card.
//!
//! The card is the text panel right-anchored on a fixed-width canvas, with the
//! curated pull requests appended below it and a floating grid of recolored icons
//! on the left. Dot fills, `N++`/`N--` counters and status glyphs get theme colors.

use crate::core::{
    config::ProfileConfig,
    format::{truncate, LINE_WIDTH},
    icons::IconSheet,
    layout::{group_by_repo, panel_lines},
    state::{AggregateStats, PrState},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

const WIDTH: f64 = 1000.0;
const LINE_HEIGHT: f64 = 20.0;
const PADDING: f64 = 20.0;
const TEXT_PADDING_RIGHT: f64 = 40.0;
const TEXT_AREA_WIDTH: f64 = 500.0;

const ICON_COLS: usize = 3;
const ICON_ROWS: usize = 4;
const ICON_SIZE: f64 = 55.0;
const ICON_GAP: f64 = 40.0;

static DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"·+").expect("valid regex"));
static ADDITIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,]+\+\+").expect("valid regex"));
static DELETIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,]+--").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                bg: "#F7F8FA",
                text: "#1a1a1a",
                dots: "#a0a0a0",
                add: "#1a7f37",
                del: "#cf222e",
                open: "#1a7f37",
                merged: "#8250df",
                closed: "#cf222e",
            },
            Theme::Dark => Palette {
                bg: "#262C36",
                text: "#f0f0f0",
                dots: "#6e7681",
                add: "#3fb950",
                del: "#f85149",
                open: "#3fb950",
                merged: "#a371f7",
                closed: "#f85149",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub dots: &'static str,
    pub add: &'static str,
    pub del: &'static str,
    pub open: &'static str,
    pub merged: &'static str,
    pub closed: &'static str,
}

impl Palette {
    fn state_color(&self, state: PrState) -> &'static str {
        match state {
            PrState::Open => self.open,
            PrState::Merged => self.merged,
            PrState::Closed => self.closed,
        }
    }
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn wrap_matches(line: &str, pattern: &Regex, color: &str) -> String {
    pattern
        .replace_all(line, |caps: &regex::Captures<'_>| {
            format!(r#"<tspan fill="{color}">{}</tspan>"#, &caps[0])
        })
        .into_owned()
}

/// Escape one panel line and color its dot fill, counters and status glyphs.
pub fn colorize(line: &str, palette: &Palette) -> String {
    let mut result = escape_xml(line);
    result = wrap_matches(&result, &DOTS, palette.dots);
    result = wrap_matches(&result, &ADDITIONS, palette.add);
    result = wrap_matches(&result, &DELETIONS, palette.del);

    for state in [PrState::Open, PrState::Merged, PrState::Closed] {
        let glyph = state.glyph().to_string();
        let colored = format!(
            r#"<tspan fill="{}">{glyph}</tspan>"#,
            palette.state_color(state)
        );
        result = result.replace(&glyph, &colored);
    }
    result
}

/// Panel lines followed by the curated pull requests, one line per PR.
pub fn card_lines(stats: &AggregateStats, profile: &ProfileConfig) -> Vec<String> {
    let mut lines = panel_lines(stats, profile);

    for group in group_by_repo(stats) {
        lines.push(String::new());
        lines.push(truncate(group.repo, LINE_WIDTH));
        for (state, pr) in &group.pulls {
            let line = format!("{} #{} {}", state.glyph(), pr.number, pr.title);
            lines.push(truncate(&line, LINE_WIDTH));
        }
    }

    lines
}

struct IconPlacement {
    x: f64,
    y: f64,
    move_x: i32,
    move_y: i32,
    duration: usize,
}

fn icon_placements(count: usize, content_height: f64) -> Vec<IconPlacement> {
    let icon_space_width = WIDTH - TEXT_AREA_WIDTH - TEXT_PADDING_RIGHT;
    let grid_width = ICON_COLS as f64 * ICON_SIZE + (ICON_COLS - 1) as f64 * ICON_GAP;
    let grid_height = ICON_ROWS as f64 * ICON_SIZE + (ICON_ROWS - 1) as f64 * ICON_GAP;
    let start_x = PADDING + (icon_space_width - grid_width) / 2.0;
    let start_y = PADDING + (content_height - grid_height) / 2.0;

    (0..count)
        .map(|i| {
            let row = (i / ICON_COLS) as f64;
            let col = (i % ICON_COLS) as f64;
            IconPlacement {
                x: start_x + col * (ICON_SIZE + ICON_GAP),
                y: start_y + row * (ICON_SIZE + ICON_GAP),
                move_x: ((i % 3) as i32 - 1) * 10,
                move_y: if i % 2 == 0 { 5 } else { -5 },
                duration: 3 + i % 4,
            }
        })
        .collect()
}

pub fn render_svg(
    stats: &AggregateStats,
    profile: &ProfileConfig,
    icons: &IconSheet,
    theme: Theme,
) -> String {
    let palette = theme.palette();
    let lines = card_lines(stats, profile);

    let content_height = lines.len() as f64 * LINE_HEIGHT;
    let height = PADDING + content_height + PADDING;
    let text_end_x = WIDTH - TEXT_PADDING_RIGHT;

    let placements = icon_placements(icons.len(), content_height);

    let mut styles = String::new();
    let mut keyframes = String::new();
    let mut images = String::new();
    for (i, ((_, encoded), place)) in icons.icons.iter().zip(&placements).enumerate() {
        let _ = write!(
            styles,
            "\n    .icon{i} {{ animation: float{i} {}s ease-in-out infinite; }}",
            place.duration
        );
        let _ = write!(
            keyframes,
            "\n    @keyframes float{i} {{\n      0%, 100% {{ transform: translate(0, 0); }}\n      50% {{ transform: translate({}px, {}px); }}\n    }}",
            place.move_x, place.move_y
        );
        let _ = writeln!(
            images,
            r#"  <image class="icon icon{i}" x="{}" y="{}" width="{ICON_SIZE}" height="{ICON_SIZE}" href="data:image/png;base64,{encoded}"/>"#,
            place.x, place.y
        );
    }

    let mut texts = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = PADDING + (i + 1) as f64 * LINE_HEIGHT;
        let _ = writeln!(
            texts,
            r#"  <text x="{text_end_x}" y="{y}" text-anchor="end">{}</text>"#,
            colorize(line, &palette)
        );
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{WIDTH}" height="{height}">
  <style>
    text {{
      font-family: 'JetBrains Mono', 'Fira Code', monospace;
      font-size: 14px;
      fill: {text};
      white-space: pre;
    }}
    .icon {{
      transform-origin: center;
    }}{styles}{keyframes}
  </style>
  <rect width="100%" height="100%" fill="{bg}" rx="8"/>
{images}{texts}</svg>
"#,
        text = palette.text,
        bg = palette.bg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::tests::sample_stats;

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::Light.name(), "light");
        assert_eq!(Theme::Dark.name(), "dark");
        assert_ne!(Theme::Light.palette().bg, Theme::Dark.palette().bg);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a < b & "c" > d"#), "a &lt; b &amp; &quot;c&quot; &gt; d");
    }

    #[test]
    fn test_colorize_wraps_dots_and_counters() {
        let palette = Theme::Light.palette();
        let line = colorize(". Lines of Code:····1,500 (1,200++, 300--)", &palette);

        assert!(line.contains(r##"<tspan fill="#a0a0a0">····</tspan>"##));
        assert!(line.contains(r##"<tspan fill="#1a7f37">1,200++</tspan>"##));
        assert!(line.contains(r##"<tspan fill="#cf222e">300--</tspan>"##));
    }

    #[test]
    fn test_colorize_glyphs_use_state_colors() {
        let palette = Theme::Dark.palette();
        let line = colorize("☑ #10 Fix", &palette);
        assert!(line.starts_with(r##"<tspan fill="#a371f7">☑</tspan>"##));

        let closed = colorize("⌧ #11 Drop", &palette);
        assert!(closed.starts_with(r##"<tspan fill="#f85149">⌧</tspan>"##));
    }

    #[test]
    fn test_colorize_leaves_section_dashes_alone() {
        let palette = Theme::Light.palette();
        let header = "- GitHub Stats ----------";
        assert_eq!(colorize(header, &palette), header);
    }

    #[test]
    fn test_card_lines_append_pull_requests() {
        let lines = card_lines(&sample_stats(), &ProfileConfig::default());
        assert!(lines.iter().any(|l| l == "eslint/eslint"));
        assert!(lines.iter().any(|l| l.starts_with("☐ #30 ")));
        assert!(lines.iter().all(|l| l.chars().count() <= LINE_WIDTH));
    }

    #[test]
    fn test_render_svg_structure() {
        let icons = IconSheet {
            icons: vec![
                ("assets/icons/a.png".to_string(), "AAAA".to_string()),
                ("assets/icons/b.png".to_string(), "BBBB".to_string()),
            ],
        };
        let svg = render_svg(&sample_stats(), &ProfileConfig::default(), &icons, Theme::Dark);

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#262C36""##));
        assert!(svg.contains("href=\"data:image/png;base64,AAAA\""));
        assert!(svg.contains("@keyframes float1"));
        assert!(svg.contains(".icon1 { animation: float1 4s ease-in-out infinite; }"));
        assert!(svg.contains("&lt;docs&gt; &amp; tests"));

        let line_count = card_lines(&sample_stats(), &ProfileConfig::default()).len();
        assert_eq!(svg.matches("<text ").count(), line_count);
        let height = 2.0 * PADDING + line_count as f64 * LINE_HEIGHT;
        assert!(svg.contains(&format!("width=\"1000\" height=\"{height}\"")));
    }

    #[test]
    fn test_render_svg_without_icons() {
        let svg = render_svg(
            &sample_stats(),
            &ProfileConfig::default(),
            &IconSheet::default(),
            Theme::Light,
        );
        assert!(!svg.contains("<image"));
        assert!(svg.contains(r##"fill="#F7F8FA""##));
    }
}
