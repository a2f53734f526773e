use clap::Parser;

use schoolyard::adapter::inbound::cli::{command::Cli, dispatch, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = dispatch::run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
