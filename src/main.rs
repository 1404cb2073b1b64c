fn main() {
    if let Err(err) = imgtag::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
