//! Loads a model directory, writes generated sources and exercises the
//! same model in-process.
//!
//! ```text
//! cargo run -p storz --example generate -- [MODEL_DIR] [OUT_DIR]
//! ```

use std::path::PathBuf;
use storz::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let model_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models"));
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("storz-generated"));

    let registry = registry_from_dir(&model_dir)?;
    tracing::info!(
        "loaded {} structs and {} resources from {}",
        registry.structs().len(),
        registry.resources().len(),
        model_dir.display()
    );

    for path in Generator::new(&registry).write_to(&out_dir)? {
        println!("{}", path.display());
    }

    let schema = ModelSchema::compile(&registry)?;
    for kind in schema.types() {
        let mut object = schema.object_for_kind(kind)?;
        object.from_json(r#"{"external": {"isbn": "978-0132350884", "pages": 464}}"#)?;
        tracing::info!(
            "{kind}: primary key '{}', json {}",
            object.primary_key(),
            object.to_json()?
        );
    }

    Ok(())
}
