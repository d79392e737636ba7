use crate::Result;
use crate::config::Config;
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is the platform config directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Write the starter configuration file.
pub fn init_config(args: &InitArgs) -> Result<()> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => Config::locate(None)?,
    };

    Config::save_starter(&output, args.force)?;
    println!("Generated starter configuration file: {output}");
    Ok(())
}
