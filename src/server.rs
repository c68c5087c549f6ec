// HTTP/HTTPS listener

use crate::config::ServerConfig;
use anyhow::Context;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Serve `app` until the process is stopped, over TLS when both certificate
/// paths are configured.
pub async fn serve(app: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    match &config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
                .await
                .with_context(|| {
                    format!(
                        "Failed to load TLS certificate {} / key {}",
                        tls.cert_file.display(),
                        tls.key_file.display()
                    )
                })?;

            info!("Server running on {} (HTTPS)", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await
                .context("Server error")?;
        }
        None => {
            info!("Server running on {} (HTTP)", addr);
            let listener = TcpListener::bind(addr).await?;
            axum::serve(listener, app).await.context("Server error")?;
        }
    }

    Ok(())
}
