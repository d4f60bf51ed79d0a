use std::path::PathBuf;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_json;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SetResponse {
    path: PathBuf,
}

pub fn run(
    study: &str,
    file: &str,
    raw_document: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let document = parse_json(raw_document, "document")?;
    let path = ctx.study(study)?.save_config(file, &document)?;
    output(&SetResponse { path }, flags.format)
}

#[cfg(test)]
mod tests {
    use pathta_store::json;
    use serde_json::json;

    use super::run;
    use crate::commands::shared::fixture::fixture_with_study;

    #[test]
    fn second_set_lands_next_to_the_first() {
        let fx = fixture_with_study();
        let config = fx.data_root().join("Alpha").join("config");

        run("Alpha", "acq.json", r#"{"sf": 512}"#, &fx.ctx, &fx.flags).expect("first set");
        run("Alpha", "acq.json", r#"{"sf": 1024}"#, &fx.ctx, &fx.flags).expect("second set");

        assert_eq!(json::load(&config.join("acq.json")).expect("load"), json!({"sf": 512}));
        assert_eq!(json::load(&config.join("acq(1).json")).expect("load"), json!({"sf": 1024}));
    }

    #[test]
    fn non_json_file_name_is_rejected() {
        let fx = fixture_with_study();
        let err = run("Alpha", "acq.txt", "{}", &fx.ctx, &fx.flags).expect_err("should fail");
        assert!(err.to_string().contains("not a JSON configuration file"));
    }
}
