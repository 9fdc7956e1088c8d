use clap::{Parser, Subcommand};
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;

#[derive(Parser)]
#[command(name = "origin-cli")]
#[command(about = "Inspect synthetic responses from a running origin-resolver", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a path and print status, headers and body
    Fetch {
        path: String,
        /// Only print status and headers
        #[arg(long)]
        head: bool,
    },
    /// Call a proxy endpoint
    Call {
        path: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
        /// Request body
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Fetch { path, head } => {
            let res = client
                .get(format!("{}/{}", base, path.trim_start_matches('/')))
                .send()
                .await?;
            print_response(res, !head).await?;
        }
        Commands::Call { path, method, data } => {
            let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let mut req = client.request(method, format!("{}/{}", base, path.trim_start_matches('/')));
            if let Some(data) = data {
                req = req.body(data);
            }
            print_response(req.send().await?, true).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response, with_body: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("{:?} {}", res.version(), res.status());
    print_headers(res.headers());
    if !with_body {
        return Ok(());
    }

    let is_json = res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    let text = res.text().await?;
    println!();
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) if is_json => println!("{}", serde_json::to_string_pretty(&json)?),
        _ => println!("{}", text),
    }
    Ok(())
}

fn print_headers(headers: &HeaderMap) {
    for (name, value) in headers {
        println!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
}
