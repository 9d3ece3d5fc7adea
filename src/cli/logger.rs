#![deny(warnings)]

use std::{env, io};

use log::LevelFilter;

// Diagnostics stay off stderr unless asked for; user-facing output goes
// through the Cli writer, not the logger.
pub(crate) fn setup() {
    let level = match env::var("SIFSTORE_LOG").ok().as_deref() {
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        _ => LevelFilter::Warn,
    };

    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
}
