use std::env;

fn main() {
    // Pass CPU frequency for timing calculations
    println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds only run the hardware-independent library and its tests
    let target = env::var("TARGET").unwrap();
    if !target.contains("avr") {
        return;
    }

    // Teensy 2.0
    println!("cargo:rustc-link-arg=-mmcu=atmega32u4");

    if env::var("CARGO_FEATURE_ATMEGA32U4").is_err() {
        println!("cargo:warning=AVR build without the `atmega32u4` feature: no binaries will be produced");
    }
}
