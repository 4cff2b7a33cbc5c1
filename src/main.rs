use std::env;

use nestegg::storage::JsonFileStore;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let data_file = raw_args
            .get(3)
            .cloned()
            .unwrap_or_else(|| "scenarios.json".to_string());
        let store = Box::new(JsonFileStore::new(data_file));
        if let Err(e) = nestegg::api::run_http_server(port, store).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    eprintln!("Usage: cargo run -- serve [port] [data-file]");
    std::process::exit(1);
}
