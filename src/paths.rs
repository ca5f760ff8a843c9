use std::path::PathBuf;

const APP_DIR: &str = "baka";

pub fn cache_file_path() -> PathBuf {
    match dirs::cache_dir() {
        Some(base) => base.join(APP_DIR).join("anime_schedule.json"),
        None => PathBuf::from("anime_schedule.json"),
    }
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|base| base.join(APP_DIR).join("baka.log"))
}
