use anyhow::{Context, Result};
use sni_watcher::Watcher;

mod opts;

fn main() {
    let opts = opts::Opt::from_env();

    let log_level_filter = if opts.log_debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init_timed();
    } else {
        pretty_env_logger::formatted_timed_builder()
            .filter(Some("sni_watcherd"), log_level_filter)
            .filter(Some("sni_watcher"), log_level_filter)
            .init();
    }

    if let Err(err) = run(opts) {
        log::error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run(opts: opts::Opt) -> Result<()> {
    // everything happens on one thread, requests are handled strictly one after another
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to initialize tokio runtime")?;

    rt.block_on(async {
        let con = (if opts.system_bus { zbus::Connection::system().await } else { zbus::Connection::session().await })
            .context("Failed to connect to dbus")?;
        log::debug!("Connected to dbus as {:?}", con.unique_name());

        let watcher = sni_watcher::run(Watcher::new(), con, opts.names, shutdown_signal())
            .await
            .context("Failed to start StatusNotifierWatcher")?;
        log::info!("Exiting with {} item(s) registered", watcher.registry().items().len());
        Ok(())
    })
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Failed to listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => log::debug!("Received SIGINT"),
        _ = sigterm.recv() => log::debug!("Received SIGTERM"),
    }
}
