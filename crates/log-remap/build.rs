use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// `255 / ln(256)`: maps ln(1 + 255) onto 255
fn log_scale() -> f64 {
    255.0 / 256f64.ln()
}

/// Byte coercion of a clamped 8-bit store: round half to even, clamp
fn to_u8_clamped(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("log_lut.rs");
    let mut file = File::create(&dest_path).unwrap();

    writeln!(file, "/// Lookup table for the log(1+x) channel remap").unwrap();
    writeln!(file, "/// Index: input channel value, Value: remapped channel value").unwrap();
    writeln!(file, "pub static LOG_LUT: [u8; 256] = [").unwrap();
    for i in 0..256u32 {
        let remapped = to_u8_clamped(log_scale() * (i as f64).ln_1p());
        if i > 0 && i % 16 == 0 {
            writeln!(file).unwrap();
        }
        write!(file, " {remapped},").unwrap();
    }
    writeln!(file, "\n];").unwrap();

    println!("cargo::rerun-if-changed=build.rs");
}
