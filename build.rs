use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // Every field Config reads must have the type it deserializes into,
    // otherwise Config::compiled_default falls back to struct defaults.
    if let Some(value) = field(&table, "code", "default_language") {
        if !value.is_str() {
            panic!("Invalid code.default_language in default_config.toml: expected a string");
        }
    }

    if let Some(value) = field(&table, "blocks", "unsupported") {
        match value.as_str() {
            Some("skip" | "warn" | "error") => {}
            _ => panic!(
                "Invalid blocks.unsupported in default_config.toml: expected skip, warn or error"
            ),
        }
    }

    for (name, section) in &table {
        if !matches!(name.as_str(), "code" | "blocks") {
            panic!("Unknown section [{}] in default_config.toml", name);
        }
        if !section.is_table() {
            panic!("[{}] in default_config.toml must be a table", name);
        }
    }
}

fn field<'a>(table: &'a toml::Table, section: &str, key: &str) -> Option<&'a toml::Value> {
    table.get(section).and_then(|section| section.get(key))
}
