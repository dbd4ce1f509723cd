//! Core functionality for the profile-stats tool.
//!
//! This module provides the building blocks for collecting GitHub statistics,
//! persisting snapshots between runs, and rendering the profile artifacts.

pub mod cache;
pub mod collector;
pub mod command_init;
pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod icons;
pub mod layout;
pub mod output;
pub mod queries;
pub mod readme;
pub mod state;
pub mod svg;

// === Error handling ===
pub use error::{ProfileStatsError, Result};

// === Configuration ===
// Environment identifiers and the optional profile file
pub use config::{Config, ProfileConfig, ProfileRow};

// === Remote source ===
// GraphQL transport seam and its reqwest implementation
pub use github::{GraphQlTransport, HttpTransport};

// === Collection ===
// Query sequencing plus the LOC and open-source PR caching policies
pub use collector::{
    merge_pull_requests, Affiliation, LocReport, LocTally, QueryCounter, RepoCountKind,
    StatsCollector,
};

// === Snapshots ===
pub use cache::SnapshotStore;
pub use state::{
    AggregateStats, LocSnapshot, OpenSourcePrs, OssPrSnapshot, PrState, PullRequestRecord,
    UserIdentity,
};

// === Command initialization ===
pub use command_init::{RunContext, RunOptions};

// === Rendering ===
pub use format::{format_number, pad_line, section_header, separator, LINE_WIDTH};
pub use icons::IconSheet;
pub use readme::render_readme;
pub use svg::{render_svg, Theme};

// === Output formatting ===
pub use output::{print_artifact, print_error, print_success};
