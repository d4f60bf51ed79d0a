use pathta_search::SearchOptions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pathta search`.
pub fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let study = ctx.study(&args.study)?;
    let found = study.search(args.folder.as_deref(), &args.patterns, &search_options(args))?;
    output(&found, flags.format)
}

fn search_options(args: &SearchArgs) -> SearchOptions {
    SearchOptions {
        case_sensitive: !args.ignore_case,
        intersection: !args.union,
        full_path: !args.name_only,
        sort: !args.no_sort,
        exclude: args.exclude.iter().cloned().collect(),
        split_into: args.split,
        load_single: args.single,
    }
}
