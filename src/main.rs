fn main() {
    sahayak::run();
}
