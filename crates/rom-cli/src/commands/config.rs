use anyhow::Result;
use rom_config::UnusedKeyPolicy;

pub fn hash(paths: &[String]) -> Result<()> {
    let loaded = rom_config::load_layered_yaml(paths)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

pub fn check(paths: &[String], fail_on_unused: bool) -> Result<()> {
    let loaded = rom_config::load_layered_yaml(paths)?;
    let policy = if fail_on_unused {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = rom_config::report_unused_keys(&loaded.config_json, policy)?;
    // Settings must also parse, not just merge.
    let settings = rom_config::ClientSettings::from_config_json(&loaded.config_json)?;

    println!("config_hash={}", loaded.config_hash);
    println!("base_url={}", settings.base_url);
    println!("degraded_mode={}", settings.degraded_mode.as_str());
    println!("unused_keys={}", report.unused_leaf_pointers.len());
    for key in &report.unused_leaf_pointers {
        println!("unused={key}");
    }
    Ok(())
}
