//! Effective configuration command

use anyhow::Result;

use crate::output;
use crate::settings::ConfigArgs;

/// Print the configuration a `run` with the same flags would use
pub fn execute(args: &ConfigArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;

    if json {
        output::print_json("config", &config);
    } else {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
