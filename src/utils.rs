use chrono::{DateTime, Local};
use percent_encoding::percent_decode_str;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_log(path: PathBuf) {
    let _ = std::fs::write(&path, "");
    let _ = LOG_PATH.set(path);
}

pub fn log_msg(level: &str, msg: &str) {
    let Some(path) = LOG_PATH.get() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let now: DateTime<Local> = Local::now();
        let msg = msg.replace('"', "'");
        let _ = writeln!(
            file,
            "time=\"{time}\" level={level} msg=\"{msg}\"",
            time = now.format("%Y-%m-%dT%H:%M:%S%z"),
        );
    }
}

pub fn decode_url(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().to_string()
}
