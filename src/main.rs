use std::{env, ffi::OsStr, path::PathBuf};

mod app;
mod config;
mod engine;
mod library;
mod playback;
mod runtime;
mod seek;
mod ui;

const USAGE: &str = "usage: arcplay [DIR]\n       arcplay --print-default-config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arg = env::args_os().nth(1);

    if arg.as_deref() == Some(OsStr::new("--print-default-config")) {
        print!("{}", config::Settings::default_toml()?);
        return Ok(());
    }
    if matches!(arg.as_deref().and_then(OsStr::to_str), Some("-h" | "--help")) {
        println!("{USAGE}");
        return Ok(());
    }

    let dir = match arg {
        Some(a) => PathBuf::from(a),
        None => env::current_dir()?,
    };
    runtime::run(dir)
}
