//! Schema check command handler

use super::utils::load_schema;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{info, instrument};

/// Handle the check command
#[instrument(skip(output), fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("check_command", &args.schema.display().to_string());
    output.info(&format!("Checking schema: {}", args.schema.display()))?;

    let schema = load_schema(&args.schema)?;
    let kinds = schema.field_kinds();
    info!(fields = kinds.len(), "Schema is valid");

    output.success(&format!("✓ Schema is valid ({} top-level fields)", schema.len()))?;
    output.section("Fields")?;
    output.field_kinds(&kinds)
}
