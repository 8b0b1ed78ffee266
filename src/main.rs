fn main() {
    pathsort::cli::run();
}
