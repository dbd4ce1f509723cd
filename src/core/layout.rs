//! Text panel shared by the Markdown and SVG renderers.
//!
//! # Public API
//! - [`panel_lines`]: Header, personal rows and statistics as fixed-width lines
//! - [`group_by_repo`]: Pull requests grouped by repository in encounter order
//! - [`combine_with_art`]: Places the ASCII art to the left of the panel

use crate::core::{
    config::{ProfileConfig, ProfileRow},
    format::{format_number, pad_line, section_header, separator},
    state::{AggregateStats, PrState, PullRequestRecord},
};

pub const ART_GAP: usize = 20;

pub const ASCII_ART: [&str; 11] = [
    "     .---------.     ",
    "     | >_      |     ",
    "     |         |     ",
    "     |  ____   |     ",
    "     '---------'     ",
    "   _____|___|_____   ",
    "  / ::::::::::::: \\  ",
    " / ::::::::::::::: \\ ",
    "'-------------------'",
    "                     ",
    "    hello, world     ",
];

/// One repository's pull requests with their states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoGroup<'a> {
    pub repo: &'a str,
    pub pulls: Vec<(PrState, &'a PullRequestRecord)>,
}

pub fn group_by_repo(stats: &AggregateStats) -> Vec<RepoGroup<'_>> {
    let mut groups: Vec<RepoGroup<'_>> = Vec::new();

    for (state, pr) in stats.open_source_prs.iter_with_state() {
        match groups.iter().position(|group| group.repo == pr.repo) {
            Some(idx) => groups[idx].pulls.push((state, pr)),
            None => groups.push(RepoGroup {
                repo: &pr.repo,
                pulls: vec![(state, pr)],
            }),
        }
    }

    groups
}

fn push_rows(lines: &mut Vec<String>, rows: &[ProfileRow]) {
    lines.extend(rows.iter().map(|row| pad_line(&row.label, &row.value)));
}

pub fn panel_lines(stats: &AggregateStats, profile: &ProfileConfig) -> Vec<String> {
    let name = profile
        .display_name
        .as_deref()
        .unwrap_or(&stats.identity.name);

    let mut lines = vec![section_header(name)];
    push_rows(&mut lines, &profile.about);

    if !profile.contact.is_empty() {
        lines.push(String::new());
        lines.push(section_header("- Contact"));
        push_rows(&mut lines, &profile.contact);
    }

    let loc = format!(
        "{} ({}++, {}--)",
        format_number(stats.lines_of_code()),
        format_number(stats.additions),
        format_number(stats.deletions)
    );

    lines.push(String::new());
    lines.push(section_header("- GitHub Stats"));
    lines.push(pad_line("Contributes:", &format_number(stats.open_source_contributions)));
    lines.push(pad_line("Repositories:", &format_number(stats.repos)));
    lines.push(pad_line("Stars:", &format_number(stats.stars)));
    lines.push(pad_line("Followers:", &format_number(stats.identity.followers)));
    lines.push(pad_line("Commits:", &format_number(stats.total_commits)));
    lines.push(pad_line("Issues:", &format_number(stats.issues)));
    lines.push(pad_line("Pull Requests:", &format_number(stats.pull_requests)));
    lines.push(pad_line("Lines of Code:", &loc));

    let prs = &stats.open_source_prs;
    lines.push(String::new());
    lines.push(section_header("- Open Source PRs"));
    lines.push(pad_line(
        &format!("{} In Progress:", PrState::Open.glyph()),
        &format_number(prs.open.len() as u64),
    ));
    lines.push(pad_line(
        &format!("{} Merged:", PrState::Merged.glyph()),
        &format_number(prs.merged.len() as u64),
    ));
    lines.push(pad_line(
        &format!("{} Closed:", PrState::Closed.glyph()),
        &format_number(prs.closed.len() as u64),
    ));
    lines.push(separator());

    lines
}

/// Art column, gap, then text; the art is pinned to the bottom of the panel.
pub fn combine_with_art(text_lines: &[String]) -> String {
    let art_width = ASCII_ART[0].chars().count();
    let empty_art = " ".repeat(art_width);
    let gap = " ".repeat(ART_GAP);
    let total = text_lines.len().max(ASCII_ART.len());
    let art_offset = total - ASCII_ART.len();

    (0..total)
        .map(|i| {
            let art = i
                .checked_sub(art_offset)
                .map(|idx| ASCII_ART[idx])
                .unwrap_or(empty_art.as_str());
            let text = text_lines.get(i).map(String::as_str).unwrap_or("");
            format!("{art}{gap}{text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
