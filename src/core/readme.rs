use crate::core::{
    config::ProfileConfig,
    layout::{combine_with_art, group_by_repo, panel_lines},
    state::AggregateStats,
};
use std::fmt::Write;

/// Render the profile README: the text panel in a code block, then the curated PR list.
pub fn render_readme(stats: &AggregateStats, profile: &ProfileConfig) -> String {
    let panel = combine_with_art(&panel_lines(stats, profile));

    let mut readme = String::with_capacity(panel.len() + 1024);
    let _ = write!(readme, "```text\n{panel}\n```\n");

    for group in group_by_repo(stats) {
        let _ = write!(readme, "\n**{}**<br>\n", group.repo);
        for (state, pr) in &group.pulls {
            let _ = writeln!(
                readme,
                "  {} [#{}]({}) {}<br>",
                state.glyph(),
                pr.number,
                pr.url,
                pr.title
            );
        }
    }

    readme
}
