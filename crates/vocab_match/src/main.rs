fn main() {
    vocab_match::run();
}
