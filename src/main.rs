fn main() {
    if let Err(err) = geoslim::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
