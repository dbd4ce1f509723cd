use crate::core::{
    collector::StatsCollector,
    command_init::{RunContext, RunOptions},
    error::Result,
    github::GraphQlTransport,
    state::AggregateStats,
};

/// Collect statistics and print them as JSON; only the snapshot caches are written.
pub fn execute_stats(options: &RunOptions) -> Result<()> {
    let context = RunContext::initialize(options)?;
    let transport = context.transport()?;

    let stats = collect_stats(&context, &transport)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub fn collect_stats<T: GraphQlTransport + ?Sized>(
    context: &RunContext,
    transport: &T,
) -> Result<AggregateStats> {
    let mut collector = StatsCollector::new(transport, &context.store, &context.config.user_name);
    let stats = collector.collect(&context.profile.open_source_repos)?;
    log::info!("Done! queries: {}", collector.counter());
    Ok(stats)
}
