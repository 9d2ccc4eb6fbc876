use crate::config::types::{Config, CrawlerConfig, ListingEntry, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_listings(&config.listing)?;

    // Selector strings must compile; the error carries the offending selector
    config.selectors.compile()?;

    Ok(())
}

/// Validates crawler timing configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.load_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "load-timeout-ms must be > 0".to_string(),
        ));
    }

    if config.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "poll-interval-ms must be > 0".to_string(),
        ));
    }

    if config.poll_interval_ms > config.load_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "poll-interval-ms ({}) must not exceed load-timeout-ms ({})",
            config.poll_interval_ms, config.load_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates listing entries
///
/// Listing names become output filename prefixes, so they are restricted to
/// filename-safe characters. Listing URLs must be absolute http(s) URLs.
fn validate_listings(listings: &[ListingEntry]) -> Result<(), ConfigError> {
    if listings.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[listing]] entry is required".to_string(),
        ));
    }

    for entry in listings {
        validate_listing_name(&entry.name)?;

        let url = Url::parse(&entry.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid listing URL '{}': {}", entry.url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Listing URL '{}' must use an http(s) scheme",
                entry.url
            )));
        }
    }

    // Duplicate names would silently overwrite each other's output files
    for (i, entry) in listings.iter().enumerate() {
        if listings[..i].iter().any(|other| other.name == entry.name) {
            return Err(ConfigError::Validation(format!(
                "Duplicate listing name '{}'",
                entry.name
            )));
        }
    }

    Ok(())
}

/// Validates a listing name (used as an output filename prefix)
fn validate_listing_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "Listing name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "Listing name '{}' must contain only alphanumeric characters, hyphens, and underscores",
            name
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
