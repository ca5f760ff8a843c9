use std::fs::{self, File};

use env_logger::{Env, Target};
use log::LevelFilter;

use crate::paths::log_file_path;

/// Routes `log` records into the session log file. The terminal belongs to
/// the viewer, so nothing is written to stderr; without a usable log file
/// logging stays off.
pub fn init(debug: bool) {
    let Some(path) = log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}
