fn main() {
    bracket_tree::cli::run();
}
