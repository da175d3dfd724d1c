fn main() {
    println!("cargo:rerun-if-changed=bindings.h");

    // Only the ESP-IDF build needs the toolchain environment; host builds
    // (simulation binary, tests) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
