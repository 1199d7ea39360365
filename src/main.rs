//! Preview binary - loads a directory of language files into a registry and
//! prints how message keys resolve.
//!
//! Usage:
//!   cargo run -- greeting farewell        # Resolve the given keys
//!
//! Required environment variables:
//! - LANGUAGE_DIR
//!
//! Optional:
//! - DEFAULT_LANGUAGE (defaults to en)
//! - PREVIEW_TENANT (defaults to preview)
//! - PREVIEW_LANGUAGE (language selected for the preview user)

use anyhow::{bail, Context, Result};
use language_registry::config::Config;
use language_registry::i18n::{load_language_dir, JsonLanguageFileParser};
use language_registry::{LanguageRegistry, UserId};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_registry=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let keys: Vec<String> = std::env::args().skip(1).collect();

    info!("Loading language files from {}", config.language_dir.display());
    let sets = load_language_dir(&JsonLanguageFileParser, &config.language_dir)
        .context("Failed to load language files")?;

    let (defaults, others): (Vec<_>, Vec<_>) = sets
        .into_iter()
        .partition(|set| set.language() == &config.default_language);
    let Some(default_set) = defaults.into_iter().last() else {
        bail!(
            "No language file for default language '{}' in {}",
            config.default_language,
            config.language_dir.display()
        );
    };

    let registry = LanguageRegistry::new();
    let tenant = registry.register_tenant_set(config.tenant.clone(), default_set)?;
    for set in others {
        tenant.add_language_set(set)?;
    }

    let user = UserId::random();
    if let Some(language) = &config.preview_language {
        tenant.set_user_language(user, language.clone())?;
    }
    let effective = registry.effective_language(tenant.id(), user)?;
    info!(
        "Tenant '{}' languages: {:?}, previewing as '{}'",
        tenant.id(),
        registry
            .languages(tenant.id())?
            .iter()
            .map(|l| l.code().to_string())
            .collect::<Vec<_>>(),
        effective
    );

    for key in &keys {
        match tenant.translation(user, key) {
            Some(value) => println!("{} = {}", key, value),
            None => {
                warn!("No translation for '{}'", key);
                println!("{} = <missing>", key);
            }
        }
    }

    let report = serde_json::to_string_pretty(&registry.metrics().report())?;
    println!("{}", report);

    Ok(())
}
