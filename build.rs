fn main() {
    // ESP-IDF toolchain environment is only needed for the firmware binary.
    // Host builds (library + tests) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
