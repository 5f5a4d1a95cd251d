use std::env;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = fireplan::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("plan") => match fireplan::api::run_plan_cli(&raw_args[2..]) {
            Ok(json) => println!("{json}"),
            Err(msg) => {
                eprintln!("{msg}");
                std::process::exit(2);
            }
        },
        _ => {
            eprintln!("Usage: cargo run -- serve [port]");
            eprintln!("       cargo run -- plan [--current-age 30 --monthly-expenses 3000 ...]");
            std::process::exit(1);
        }
    }
}
