#[tokio::main]
async fn main() {
    ikigaivilla_backend::run().await;
}
