use std::env;
use std::fs;
use std::path::Path;

// Reenvía las entradas KTRIP_* de un .env opcional como variables de compilación
// para que config.rs las lea con option_env!.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=No .env file found, using built-in K-Trip defaults.");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // Solo claves propias; lo que ya venga del entorno tiene prioridad
        if key.starts_with("KTRIP_") && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
