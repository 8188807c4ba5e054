#[tokio::main]
async fn main() {
    if let Err(err) = invoice_dashboard::axum().await {
        eprintln!("invoice-dashboard: {}", err);
        std::process::exit(1);
    }
}
