fn main() {
    if let Err(err) = theater_billing::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
