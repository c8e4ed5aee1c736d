//! Printing simulation results.
use std::io::Write;

use anyhow::Result;
use dogma_core::SimulationOutput;

use crate::config::OutputFormat;

/// Writes `output` in `format`, followed by its hex digest.
pub fn render(output: &SimulationOutput, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, output)?;
            writeln!(out)?;
        }
        OutputFormat::Summary => write_summary(output, out)?,
    }
    writeln!(out, "digest: {}", hex::encode(output.digest()))?;
    Ok(())
}

fn write_summary(output: &SimulationOutput, out: &mut impl Write) -> Result<()> {
    let hull = &output.hull;
    match &hull.name {
        Some(name) => writeln!(out, "{} ({})", name, hull.type_id.get())?,
        None => writeln!(out, "hull {}", hull.type_id.get())?,
    }
    writeln!(
        out,
        "modules: {}  drones: {}  fighters: {}  implants: {}  skills: {}",
        output.modules.len(),
        output.drones.len(),
        output.fighters.len(),
        output.implants.len(),
        output.skills.len()
    )?;
    for (name, value) in &hull.attributes_by_name {
        writeln!(out, "  {name:<28} {value:>16.4}")?;
    }
    Ok(())
}
