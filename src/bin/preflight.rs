use product_catalog::infra::config::{self, StoreBackend};
use product_catalog::PgProductStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           PRODUCT_STORE, DATABASE_URL, PORT, BIND_ADDR, DB_MAX_CONNECTIONS, CLIENT_TIMEOUT_SECS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if anything is malformed)
    let backend = config::store_backend()?;
    let port = config::port()?;
    let max_connections = config::db_max_connections()?;
    let timeout = config::client_timeout()?;

    println!("> Preflight:");
    println!("  PRODUCT_STORE={:?}", backend);
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  PORT={}", port);
    println!("  DB_MAX_CONNECTIONS={}", max_connections);
    println!("  CLIENT_TIMEOUT_SECS={}", timeout.as_secs());

    if backend == StoreBackend::Memory {
        println!("> In-memory store selected; no database to check.");
        println!("> Preflight OK");
        return Ok(());
    }

    let database_url = config::database_url()?;
    let store = PgProductStore::connect(&database_url, max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Postgres unreachable: {}", e))?;
    let count = store.count().await?;
    println!("> Postgres reachable, `products` table ready ({} rows).", count);
    println!("> Preflight OK");
    Ok(())
}
