#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hsk_trainer::run().await
}
