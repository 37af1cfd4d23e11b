#[tokio::main]
async fn main() {
    pollboard::start().await;
}
