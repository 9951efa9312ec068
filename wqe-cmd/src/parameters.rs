//! Listing of the measurement schema.

use wqe_core::parameter::schema;

/// Render the schema as an aligned key / label / unit table.
pub fn render_schema() -> String {
    let mut table = format!("{:<22}{:<24}{}\n", "KEY", "LABEL", "UNIT");
    for definition in schema() {
        table.push_str(&format!(
            "{:<22}{:<24}{}\n",
            definition.key, definition.label, definition.unit
        ));
    }
    table
}

pub fn run_parameters() -> anyhow::Result<()> {
    print!("{}", render_schema());
    Ok(())
}
