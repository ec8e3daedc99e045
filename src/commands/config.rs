use anyhow::Result;
use nova_core::config::NovaConfig;
use owo_colors::OwoColorize;

pub fn init(force: bool) -> Result<()> {
    let path = NovaConfig::config_path()?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\nUse --force to overwrite it",
            path.display()
        );
    }

    NovaConfig::create_default_config(&path)?;
    println!("{} {}", "Wrote".green(), path.display());

    Ok(())
}

pub fn path() -> Result<()> {
    let config_path = NovaConfig::config_path()?;
    let config = NovaConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!(
        "  Events:  {}",
        config
            .data_path()
            .join(format!("{}.json", config.events_key()))
            .display()
    );

    Ok(())
}
