use std::process;

fn main() {
    if let Err(e) = distkit::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
