fn main() -> eframe::Result {
    pupe::run_gui()
}
