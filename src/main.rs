use std::process::ExitCode;

use anyhow::Context as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    asset_search::utils::logging::init().context("init logging")?;
    asset_search::cli::run()
}
