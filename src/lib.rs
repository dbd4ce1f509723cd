//! Profile Stats - collects GitHub activity statistics and renders them into a profile
//! README and themed SVG cards.
//!
//! The library is organised the way a run flows:
//! configuration → collection over GraphQL (with the LOC and open-source PR snapshot
//! policies) → aggregate record → Markdown/SVG rendering → artifacts on disk.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Configuration and command initialization
//! - The GraphQL transport seam and the statistics collector
//! - Snapshot persistence
//! - README and SVG rendering

pub mod commands;
pub mod core;

pub use core::{
    // Collection
    merge_pull_requests,
    AggregateStats,
    // Configuration
    Config,
    GraphQlTransport,
    HttpTransport,
    LocSnapshot,
    OpenSourcePrs,
    OssPrSnapshot,
    ProfileConfig,
    // Error handling
    ProfileStatsError,
    PullRequestRecord,
    QueryCounter,
    Result,
    RunContext,
    RunOptions,
    SnapshotStore,
    StatsCollector,
    // Rendering
    Theme,
};
