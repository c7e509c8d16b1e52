#[tokio::main]
async fn main() -> anyhow::Result<()> {
    octobattle_lib::main().await
}
