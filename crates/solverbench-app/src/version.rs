/// Returns the tool version: `pkg_version (git_hash)`.
///
/// Without git metadata the hash is `unknown`.
#[must_use]
pub fn build_version() -> String {
    let git_hash = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    format!("{} ({git_hash})", env!("CARGO_PKG_VERSION"))
}
