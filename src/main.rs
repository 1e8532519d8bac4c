fn main() {
    sem::term::main()
}
