// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt optionale Defaults aus .env in das Binary ein

fn main() {
    // Lade .env file für den SPI Device-Pfad
    // Fehler ignorieren wenn .env nicht existiert (dann gilt /dev/spidev0.0)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(".env file nicht gefunden: {}", e);
        eprintln!("   Nutze Default-Device /dev/spidev0.0");
    }

    // Gebe den Device-Pfad an den Rust-Compiler weiter
    // Wird in config.rs über option_env!() gelesen
    if let Ok(device) = std::env::var("LIGHTER_SPI_DEVICE") {
        println!("cargo:rustc-env=LIGHTER_SPI_DEVICE={}", device);
    }

    println!("cargo:rerun-if-env-changed=LIGHTER_SPI_DEVICE");
}
