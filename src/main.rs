mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine, S2Y_API_URL and RUST_LOG may come from the real environment
    dotenvy::dotenv().ok();
    env_logger::init();

    cli::run().await?;

    Ok(())
}
