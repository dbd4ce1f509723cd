use crate::core::{
    collector::{QueryCounter, StatsCollector},
    command_init::{RunContext, RunOptions},
    error::{ProfileStatsError, Result},
    github::GraphQlTransport,
    icons::load_icon_sheet,
    print_artifact, print_success,
    readme::render_readme,
    svg::{render_svg, Theme},
    state::AggregateStats,
};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

pub const README_FILE: &str = "README.md";

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Directory receiving README.md and the SVG cards
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory of PNG icons drawn on the SVG cards
    #[arg(long, default_value = "assets/icons")]
    pub icons_dir: PathBuf,

    /// Only write README.md
    #[arg(long)]
    pub no_svg: bool,
}

impl Default for UpdateArgs {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            icons_dir: PathBuf::from("assets/icons"),
            no_svg: false,
        }
    }
}

/// A rendered output file, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug)]
pub struct UpdateReport {
    pub stats: AggregateStats,
    pub written: Vec<PathBuf>,
    pub queries: QueryCounter,
}

pub fn svg_file_name(theme: Theme) -> String {
    format!("profile-{}.svg", theme.name())
}

pub fn execute_update(options: &RunOptions, args: UpdateArgs) -> Result<()> {
    let context = RunContext::initialize(options)?;
    let transport = context.transport()?;

    let report = run_update(&context, &transport, &args)?;

    print_success("Profile updated");
    for path in &report.written {
        print_artifact(&path.to_string_lossy());
    }
    log::info!("Done! queries: {}", report.queries);
    Ok(())
}

/// Collect, render every artifact in memory, then write them all.
pub fn run_update<T: GraphQlTransport + ?Sized>(
    context: &RunContext,
    transport: &T,
    args: &UpdateArgs,
) -> Result<UpdateReport> {
    let mut collector = StatsCollector::new(transport, &context.store, &context.config.user_name);
    let stats = collector.collect(&context.profile.open_source_repos)?;

    let artifacts = render_artifacts(context, &stats, args)?;
    let written = write_artifacts(&artifacts)?;

    Ok(UpdateReport {
        stats,
        written,
        queries: collector.counter().clone(),
    })
}

pub fn render_artifacts(
    context: &RunContext,
    stats: &AggregateStats,
    args: &UpdateArgs,
) -> Result<Vec<Artifact>> {
    let mut artifacts = vec![Artifact {
        path: args.output_dir.join(README_FILE),
        contents: render_readme(stats, &context.profile),
    }];

    if !args.no_svg {
        let icons = load_icon_sheet(&args.icons_dir, &context.store.icon_path())?;
        for theme in [Theme::Light, Theme::Dark] {
            artifacts.push(Artifact {
                path: args.output_dir.join(svg_file_name(theme)),
                contents: render_svg(stats, &context.profile, &icons, theme),
            });
        }
    }

    Ok(artifacts)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| ProfileStatsError::artifact_write_failed(dir, e))
}

pub fn write_artifacts(artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        if let Some(dir) = artifact.path.parent() {
            ensure_dir(dir)?;
        }
        fs::write(&artifact.path, &artifact.contents)
            .map_err(|e| ProfileStatsError::artifact_write_failed(&artifact.path, e))?;
        log::info!("Wrote {}", artifact.path.display());
        written.push(artifact.path.clone());
    }
    Ok(written)
}
