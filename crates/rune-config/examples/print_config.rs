/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Configuration ===\n");

    println!("Text Settings:");
    println!("  Font: {:?}", config.text.font);
    println!("  Text Size: {}", config.text.text_size);
    println!();

    println!("Control Settings:");
    println!("  Password Char: {:?}", config.controls.password_char);
    println!("  Consume Input Events: {}", config.controls.consume_input_events);
    println!("  Caret Width: {}", config.controls.caret_width);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
