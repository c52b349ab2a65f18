use crate::cli::CommonArgs;
use crate::dataset::Dataset;
use super::{output_console, output_json, output_ndjson, summarize, type_breakdown};

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let dataset = Dataset::load(&common, !(json || ndjson))?;

    let stats = summarize(&dataset.records, &dataset.commits);
    let types = type_breakdown(&dataset.records);

    if json {
        output_json(&stats, &types, &dataset.source)?;
    } else if ndjson {
        output_ndjson(&stats)?;
    } else {
        output_console(&stats, &types)?;
    }

    Ok(())
}
