use anyhow::Context;

use super::StudyView;
use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_json;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    name: &str,
    key: &str,
    raw_value: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let value = parse_json(raw_value, "value")?;
    ctx.registry.set_metadata(name, key, value)?;

    let record = ctx
        .registry
        .get(name)
        .with_context(|| format!("study '{name}' missing from the registry after tagging"))?;
    output(&StudyView { name, record }, flags.format)
}
