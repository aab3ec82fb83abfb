use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(config: Option<&configs::AppConfig>) {
    let format = config.map(|c| c.logging.format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(format);
    info!(service = "velvet-leash", event = "logger_init", "tracing subscriber initialized");
}

/// Worker threads from config, else `TOKIO_WORKER_THREADS`.
fn worker_threads(config: Option<&configs::AppConfig>) -> Option<usize> {
    config
        .and_then(|c| c.server.worker_threads)
        .or_else(|| std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()))
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and DATABASE_URL apply
    dotenv().ok();
    let config = configs::AppConfig::load_or_env().ok();
    init_logging(config.as_ref());

    let instance_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "velvet-leash", event = "panic", %instance_id, pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = worker_threads(config.as_ref());
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "velvet-leash",
        event = "start",
        %instance_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "api server starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(server::run());
        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(event = "stop", %instance_id, "server stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                Ok(Err(e)) => {
                    error!(event = "run_failed", error = %e, "server::run returned error");
                    std::process::ExitCode::FAILURE
                }
                Err(e) => {
                    error!(event = "task_join_error", error = %e, "server task join error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", %instance_id, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
