use clap::Parser;
use numfmt::cli::FormatCli;

fn main() -> anyhow::Result<()> {
    let cli = FormatCli::parse();

    cfg_if::cfg_if! {
        if #[cfg(feature = "tracing")] {
            use tracing_subscriber::EnvFilter;

            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    numfmt::cli::run(&cli)
}
