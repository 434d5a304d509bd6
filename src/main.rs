fn main() {
    if let Err(e) = hey_cli::run_cli() {
        hey_logger::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
