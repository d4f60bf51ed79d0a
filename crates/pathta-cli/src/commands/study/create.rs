use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use super::StudyView;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CreateResponse<'a> {
    created: bool,
    #[serde(flatten)]
    study: StudyView<'a>,
}

pub fn run(name: &str, root: &Path, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = std::path::absolute(root)
        .with_context(|| format!("failed to resolve study root {}", root.display()))?;

    let created = ctx.registry.create(name, &root)?.is_some();
    let record = ctx
        .registry
        .get(name)
        .with_context(|| format!("study '{name}' missing from the registry after create"))?;

    output(
        &CreateResponse {
            created,
            study: StudyView { name, record },
        },
        flags.format,
    )
}
