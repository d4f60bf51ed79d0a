use pathta_study::{AssumeYes, StdinConfirm};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    name: &'a str,
    deleted: bool,
}

pub fn run(name: &str, yes: bool, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = if yes || !ctx.config.general.confirm_delete {
        ctx.registry.delete(name, &AssumeYes)?
    } else {
        ctx.registry.delete(name, &StdinConfirm)?
    };

    output(&DeleteResponse { name, deleted }, flags.format)
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::commands::shared::fixture::fixture_with_study;

    #[test]
    fn yes_flag_skips_the_prompt() {
        let mut fx = fixture_with_study();

        run("Alpha", true, &mut fx.ctx, &fx.flags).expect("delete should succeed");

        assert!(!fx.ctx.registry.contains("Alpha"));
        assert!(!fx.data_root().join("Alpha").exists());
    }

    #[test]
    fn disabled_confirmation_skips_the_prompt() {
        let mut fx = fixture_with_study();
        fx.ctx.config.general.confirm_delete = false;

        run("Alpha", false, &mut fx.ctx, &fx.flags).expect("delete should succeed");

        assert!(!fx.ctx.registry.contains("Alpha"));
    }

    #[test]
    fn unknown_study_fails() {
        let mut fx = fixture_with_study();
        let err = run("Ghost", true, &mut fx.ctx, &fx.flags).expect_err("should fail");
        assert!(err.to_string().contains("Ghost"));
    }
}
