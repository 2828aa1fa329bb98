use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shiftdesk_client::get_data_dir;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "shiftdesk.log";

/// Install the global subscriber: stderr plus a daily file under `<data dir>/logs`.
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init(level: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for command output (`--json`).
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file, guard) = match get_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join(LOG_DIR), LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry().with(filter).with(stderr).with(file).init();
    guard
}
