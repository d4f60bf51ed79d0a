use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    study: &str,
    file: &str,
    entry: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let value = ctx.study(study)?.load_config(file, entry)?;
    output(&value, flags.format)
}
