fn main() -> anyhow::Result<()> {
    wiperip::cli::run_cli()
}
