//! Remote URL normalization.
//!
//! Turns a git remote string into the https base URL a code host serves
//! the repository at.

/// Convert a remote URL (SSH shorthand or https) into its https base form.
///
/// - a trailing `.git` is stripped
/// - `user@host:path` becomes `https://host/path`
/// - anything else is returned unchanged
pub fn normalize(remote_url: &str) -> String {
    let url = remote_url.strip_suffix(".git").unwrap_or(remote_url);

    if let Some((host, path)) = split_scp_like(url) {
        return format!("https://{}/{}", host, path);
    }

    url.to_string()
}

/// Split `user@host:path` into `(host, path)`.
fn split_scp_like(url: &str) -> Option<(&str, &str)> {
    let (user, rest) = url.split_once('@')?;
    if user.is_empty() || user.contains(['/', ':']) {
        return None;
    }
    let (host, path) = rest.split_once(':')?;
    if host.is_empty() || host.contains('/') || path.is_empty() {
        return None;
    }
    Some((host, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_shorthand_becomes_https() {
        assert_eq!(
            normalize("git@host.com:org/repo.git"),
            "https://host.com/org/repo"
        );
    }

    #[test]
    fn https_git_suffix_is_stripped() {
        assert_eq!(
            normalize("https://host.com/org/repo.git"),
            "https://host.com/org/repo"
        );
    }

    #[test]
    fn https_without_suffix_is_unchanged() {
        assert_eq!(
            normalize("https://host.com/org/repo"),
            "https://host.com/org/repo"
        );
    }

    #[test]
    fn ssh_shorthand_without_suffix() {
        assert_eq!(
            normalize("git@github.com:acme/tools"),
            "https://github.com/acme/tools"
        );
    }

    #[test]
    fn nested_group_path_is_kept() {
        assert_eq!(
            normalize("git@gitlab.example.com:group/sub/repo.git"),
            "https://gitlab.example.com/group/sub/repo"
        );
    }

    #[test]
    fn ssh_scheme_url_is_left_alone() {
        assert_eq!(
            normalize("ssh://git@host.com:2222/org/repo.git"),
            "ssh://git@host.com:2222/org/repo"
        );
    }

    #[test]
    fn https_with_credentials_is_left_alone() {
        assert_eq!(
            normalize("https://user@host.com/org/repo.git"),
            "https://user@host.com/org/repo"
        );
    }

    #[test]
    fn local_path_is_left_alone() {
        assert_eq!(normalize("/srv/git/repo.git"), "/srv/git/repo");
    }
}
