use anyhow::{Context, Result};
use axis_merger::{MergeConfig, MergeSummary, run};
use log::warn;

/// Run the axis merge and print what changed.
pub fn merge_axes(config: MergeConfig) -> Result<MergeSummary> {
    let summary = run(&config).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            config.csv.display(),
            config.designspace.display()
        )
    })?;

    println!("Extension axes: {}", summary.extension_axes.join(", "));
    if !summary.axes_added.is_empty() {
        println!("  Added axes: {}", summary.axes_added.join(", "));
    }
    println!("  Duplicated sources: {}", summary.sources_duplicated.len());
    for skipped in &summary.sources_skipped {
        warn!("Master not found, not duplicated: {}", skipped.display());
    }
    println!(
        "  Instances: {} from CSV, {} at midpoint",
        summary.instances_matched, summary.instances_midpoint
    );
    for (axis, default) in &summary.defaults {
        println!("  Default {axis} = {default}");
    }
    println!("Updated designspace saved to: {}", summary.output.display());
    Ok(summary)
}
