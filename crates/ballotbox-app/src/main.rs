//! Session replay entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: ballotbox <session.json>");
        std::process::exit(2);
    };
    log::info!("Replaying ballot session {}", path);

    match ballotbox_app::Session::load(&path).and_then(|session| session.run()) {
        Ok(transcript) => print!("{}", transcript),
        Err(e) => {
            log::error!("Failed to replay {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
