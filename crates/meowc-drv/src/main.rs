fn main() {
    if let Err(e) = meowc_drv::main() {
        eprintln!("meowc: {e}");
        std::process::exit(1);
    }
}
