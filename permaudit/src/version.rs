use std::sync::OnceLock;

/// Crate version with git build metadata when available, e.g.
/// `0.2.0+abc1234`, `0.2.0+abc1234-dirty`, or plain `0.2.0`.
pub fn version_long() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| match option_env!("PERMAUDIT_GIT_HASH") {
        Some(hash) => format!("{}+{}", env!("CARGO_PKG_VERSION"), hash),
        None => env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_long_starts_with_pkg_version() {
        assert!(version_long().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
