use agenda::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    Cli::run()
}
