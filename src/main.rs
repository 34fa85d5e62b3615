use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use stored::codec::CodecRegistry;
use stored::store::{MemoryStore, Store};
use stored::www::{DataServer, DEFAULT_MAX_BODY_BYTES, IdGenerator, incrementing_ids, uuid_ids};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdScheme {
    /// "0", "1", "2", ...
    Incr,
    /// Random UUID v4
    Uuid,
}

/// Serves an in-memory object store over HTTP.
#[derive(Debug, Parser)]
#[command(name = "stored", version)]
struct Args {
    /// Address the HTTP listener binds to
    #[arg(long, env = "STORED_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Path prefix the collection is mounted at
    #[arg(long, env = "STORED_BASE", default_value = "/")]
    base: String,

    /// How identifiers are assigned to created objects
    #[arg(long, env = "STORED_IDS", value_enum, default_value_t = IdScheme::Incr)]
    ids: IdScheme,

    /// Enables `GET {base}/`, answering with all ids joined by this delimiter
    #[arg(long, env = "STORED_LIST_DELIMITER")]
    list_delimiter: Option<String>,

    /// Requests with larger bodies are rejected
    #[arg(long, env = "STORED_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// trace, debug, info, warn or error
    #[arg(long, env = "STORED_LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::info!("Starting stored on {}", args.bind);

    // 1. Storage:
    let store: Arc<dyn Store<String>> = Arc::new(MemoryStore::<String>::new());

    // 2. Identifiers:
    let id_generator: IdGenerator<String> = match args.ids {
        IdScheme::Incr => incrementing_ids(),
        IdScheme::Uuid => uuid_ids(),
    };

    // 3. HTTP server:
    let mut builder = DataServer::builder(store, id_generator)
        .base_path(&args.base)
        .codecs(CodecRegistry::text())
        .codecs(CodecRegistry::json())
        .max_body_bytes(args.max_body_bytes);

    if let Some(delimiter) = &args.list_delimiter {
        tracing::info!("Listing enabled, delimiter {:?}", delimiter);
        builder = builder.listing(delimiter);
    }

    let server = builder.build();
    tracing::info!("Collection mounted at '{}/'", server.base_path());
    tracing::info!("Press Ctrl+C to shutdown");

    server.serve(args.bind).await?;

    Ok(())
}
