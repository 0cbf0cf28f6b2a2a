#[tokio::main]
async fn main() {
    if let Err(err) = medicare_ai::run().await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
