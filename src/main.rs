fn main() {
    unfurl::cli::run();
}
