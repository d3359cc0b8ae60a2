//! `agentdesk init`: Write a default configuration file.

use agentdesk_config::AppConfig;

pub async fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    }

    if config_path.exists() && !force {
        println!("Config already exists: {}", config_path.display());
        println!("   Use --force to overwrite it with defaults.");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("Wrote default config: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("   export OPENAI_API_KEY=sk-...   # optional, canned replies otherwise");
    println!("   agentdesk serve");

    Ok(())
}
