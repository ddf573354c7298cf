fn main() {
    ppm::run_cli();
}
