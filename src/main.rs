fn main() {
    std::process::exit(dpf::app::startup::startup());
}
