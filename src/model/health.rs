const ICON_SUFFIXES: &[&str] = &[".png", ".gif"];

pub const NO_HEALTH_KEY: &str = "null";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Health {
    pub level: Option<String>,
    pub description: Option<String>,
}

impl Health {
    pub fn new(icon: Option<&str>, description: Option<&str>) -> Health {
        Health {
            level: icon.map(health_level),
            description: description.map(|d| d.to_string()),
        }
    }

    /// Key used to pick the health icon. Elements without a usable level
    /// share the `"null"` key.
    pub fn icon_key(health: Option<&Health>) -> &str {
        match health.and_then(|h| h.level.as_ref()) {
            Some(level) if !level.is_empty() => level.as_str(),
            _ => NO_HEALTH_KEY,
        }
    }
}

/// Strips a known image extension from a health icon filename.
pub fn health_level(icon: &str) -> String {
    if icon.is_empty() {
        return String::new();
    }
    ICON_SUFFIXES
        .iter()
        .find(|suffix| icon.ends_with(**suffix))
        .and_then(|suffix| icon.rfind(*suffix))
        .map(|cut| icon[..cut].to_string())
        .unwrap_or_else(|| icon.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_suffixes_are_stripped() {
        assert_eq!(health_level("health-80plus.png"), "health-80plus");
        assert_eq!(health_level("health-80plus.gif"), "health-80plus");
    }

    #[test]
    fn unknown_suffix_is_kept_verbatim() {
        assert_eq!(health_level("custom-icon"), "custom-icon");
        assert_eq!(health_level("health.svg"), "health.svg");
    }

    #[test]
    fn empty_or_absent_icon_is_not_stripped() {
        assert_eq!(Health::new(Some(""), None).level, Some(String::new()));
        assert_eq!(Health::new(None, Some("desc")).level, None);
    }

    #[test]
    fn icon_key_falls_back_to_null() {
        let healthy = Health::new(Some("health-00to19.png"), Some("Build stability"));
        assert_eq!(Health::icon_key(Some(&healthy)), "health-00to19");
        assert_eq!(Health::icon_key(Some(&Health::new(Some(""), None))), "null");
        assert_eq!(Health::icon_key(None), "null");
    }
}
