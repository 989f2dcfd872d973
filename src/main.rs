#[tokio::main]
async fn main() {
    if let Err(e) = program_fixtures::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
