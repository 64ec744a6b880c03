fn main() {
    if let Err(err) = csv_tablegen::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
