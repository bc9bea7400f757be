fn main() {
    // Host builds (tests, fuzzing, simulation) run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    {
        if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
            embuild::espidf::sysenv::output();
        }
    }
}
