use tower_lsp::{LspService, Server};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the LSP stream, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(
        "Starting {} v{}",
        sql_insert_hints_lsp::SERVER_NAME,
        sql_insert_hints_lsp::VERSION
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(sql_insert_hints_lsp::LspBackend::new);

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
