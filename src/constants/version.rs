/// package version plus the git sha `build.rs` captured, if any.
pub fn get_version() -> String {
    let version = env!("CARGO_PKG_VERSION");

    // vergen emits a placeholder instead of a sha outside of a git checkout.
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "VERGEN_IDEMPOTENT_OUTPUT" && !sha.is_empty() => {
            format!("{version} ({sha})")
        }
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_starts_with_package_version() {
        assert!(get_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
