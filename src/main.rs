#[tokio::main]
async fn main() -> anyhow::Result<()> {
    goldmedal::app::run().await
}
