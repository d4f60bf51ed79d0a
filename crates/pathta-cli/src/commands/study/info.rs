use super::StudyView;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let study = ctx.study(name)?;
    output(
        &StudyView {
            name: study.name(),
            record: study.record(),
        },
        flags.format,
    )
}
