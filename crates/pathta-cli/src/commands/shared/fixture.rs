use pathta_config::PathtaConfig;
use tempfile::TempDir;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;

/// Temp workspace holding a fresh registry file and a `data/` root for studies.
pub struct Fixture {
    pub temp: TempDir,
    pub ctx: AppContext,
    pub flags: GlobalFlags,
}

impl Fixture {
    pub fn data_root(&self) -> std::path::PathBuf {
        self.temp.path().join("data")
    }
}

pub fn fixture() -> Fixture {
    let temp = TempDir::new().expect("tempdir should create");
    std::fs::create_dir(temp.path().join("data")).expect("data root should create");
    let flags = GlobalFlags {
        format: OutputFormat::Raw,
        registry: Some(temp.path().join("studies.json").display().to_string()),
    };
    let ctx = AppContext::init(PathtaConfig::default(), &flags).expect("context should init");
    Fixture { temp, ctx, flags }
}

/// Fixture with study `Alpha` already created under the data root.
pub fn fixture_with_study() -> Fixture {
    let mut fx = fixture();
    let root = fx.data_root();
    fx.ctx
        .registry
        .create("Alpha", &root)
        .expect("create should succeed");
    fx
}
