fn main() {
    if let Err(e) = levant::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
