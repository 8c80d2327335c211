use anyhow::Result;

fn main() -> Result<()> {
    log_mangler::cli::run()
}
