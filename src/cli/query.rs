//! Query command implementation.
//!
//! Reads the selected collections and prints each resource's snapshot, keyed
//! by collection label.

use std::fs;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::QueryArgs;
use tola_content::log;
use tola_content::resource::{Publishable, Renderable, Resource};
use tola_content::site::Site;
use tola_content::utils::plural::plural_count;

/// Execute query command
pub fn run_query(args: &QueryArgs, site: &Rc<Site>) -> Result<()> {
    let labels: Vec<String> = if args.collections.is_empty() {
        site.collections().map(|c| c.label().to_string()).collect()
    } else {
        args.collections.clone()
    };

    let mut output = Map::new();
    let mut total = 0;
    for label in &labels {
        let resources = read_collection(site, label, args)?;
        total += resources.len();
        let snapshots = resources
            .iter()
            .map(|resource| serde_json::to_value(resource.to_h()))
            .collect::<Result<Vec<_>, _>>()?;
        output.insert(label.clone(), Value::Array(snapshots));
    }

    log!("query"; "found {}", plural_count(total, "resource"));
    write_output(&Value::Object(output), args)
}

fn read_collection(site: &Rc<Site>, label: &str, args: &QueryArgs) -> Result<Vec<Resource>> {
    let mut resources = site
        .read_collection(label)
        .with_context(|| format!("failed to read collection `{label}`"))?;

    let data_only = site.collection(label).is_some_and(|c| c.data());
    if !args.all && !data_only {
        resources.retain(Publishable::should_write);
    }

    if args.transform {
        for resource in &mut resources {
            let path = resource.relative_path().display().to_string();
            resource
                .transform()
                .with_context(|| format!("failed to transform {path}"))?;
        }
    }
    Ok(resources)
}

fn write_output(value: &Value, args: &QueryArgs) -> Result<()> {
    let formatted = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        writeln!(file, "{formatted}")?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{formatted}")?;
    }
    Ok(())
}
