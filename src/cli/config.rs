use crate::error::Result;
use crate::format::parse_bool;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(clean_memo: Option<String>) -> Result<()> {
    let mut settings = load_settings()?;

    if let Some(value) = clean_memo {
        parse_bool(&value)?;
        settings.clean_memo = Some(value);
        save_settings(&settings)?;
        println!("Saved settings to {}", settings_path().display());
        return Ok(());
    }

    println!(
        "clean-memo: {}",
        settings.clean_memo.as_deref().unwrap_or("(not set)")
    );
    Ok(())
}
