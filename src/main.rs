fn main() {
    // The log bridge mirrors errors to stderr
    if let Err(e) = par_tabs::cli::run() {
        log::error!("par-tabs failed: {e:#}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}
