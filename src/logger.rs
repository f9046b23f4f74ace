use std::sync::{Mutex, Once};

use slog::Drain;

static INSTALL: Once = Once::new();
static ASYNC_GUARD: Mutex<Option<slog_async::AsyncGuard>> = Mutex::new(None);

/// Turn debug logging on or off for the rest of the process.
///
/// The first call with `debug` set installs a slog logger on stderr and routes the
/// `log` macros to it. That logger is never uninstalled, later calls only move the
/// `log` level.
pub fn init(debug: bool) {
    if !debug {
        log::set_max_level(log::LevelFilter::Off);
        return;
    }

    INSTALL.call_once(|| {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let (drain, guard) = slog_async::Async::new(drain).build_with_guard();
        // Records sent after flush() are dropped.
        let drain = slog::LevelFilter::new(drain, slog::Level::Debug).ignore_res();

        let logger = slog::Logger::root(drain, slog::o!("version" => clap::crate_version!()));
        slog_scope::set_global_logger(logger).cancel_reset();

        if let Err(err) = slog_stdlog::init_with_level(log::Level::Debug) {
            slog_scope::debug!("log bridge not installed: {}", err);
        }

        if let Ok(mut slot) = ASYNC_GUARD.lock() {
            *slot = Some(guard);
        }
    });

    log::set_max_level(log::LevelFilter::Debug);
}

/// Write out the records still queued for stderr. Nothing is logged afterwards.
pub fn flush() {
    log::set_max_level(log::LevelFilter::Off);

    if let Ok(mut slot) = ASYNC_GUARD.lock() {
        slot.take();
    }
}
