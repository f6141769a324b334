//! TOML parser with helpful error messages

use super::schema::CpcodeConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse cpcode.toml with detailed error messages
pub fn parse_config(path: &Path) -> Result<CpcodeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse cpcode.toml content from string
pub fn parse_config_str(content: &str) -> Result<CpcodeConfig> {
    let mut config: CpcodeConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.normalize();
    config.validate()?;

    Ok(config)
}

/// Attach the offending lines to a TOML error
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let error_msg = error.message().to_string();

    let Some(span) = error.span() else {
        return anyhow::anyhow!("TOML parsing error: {}", error_msg);
    };

    let line_num = content[..span.start.min(content.len())]
        .matches('\n')
        .count()
        + 1;
    anyhow::anyhow!(
        "TOML parsing error at line {}:\n{}\n\nError: {}",
        line_num,
        get_line_context(content, line_num),
        error_msg
    )
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config, CpcodeConfig::default());
        assert_eq!(config.cache_timeout, 600);
        assert_eq!(config.endpoint(), None);
        assert_eq!(config.remote_name, "origin");
    }

    #[test]
    fn parses_all_fields() {
        let config = parse_config_str(
            r#"
api_endpoint = "https://api.example.com/projects/"
cache_timeout = 30
lookup_timeout = 2
remote_name = "upstream"
"#,
        )
        .unwrap();

        assert_eq!(config.endpoint(), Some("https://api.example.com/projects"));
        assert_eq!(config.cache_timeout, 30);
        assert_eq!(config.lookup_timeout().as_secs(), 2);
        assert_eq!(config.remote_name, "upstream");
    }

    #[test]
    fn negative_cache_timeout_is_accepted() {
        let config = parse_config_str("cache_timeout = -1").unwrap();
        assert_eq!(config.cache_timeout, -1);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = parse_config_str(r#"api_endpoint = "ftp://example.com""#).unwrap_err();
        assert!(err.to_string().contains("scheme must be http or https"));
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(parse_config_str(r#"api_endpoint = "not a url""#).is_err());
    }

    #[test]
    fn rejects_zero_lookup_timeout() {
        assert!(parse_config_str("lookup_timeout = 0").is_err());
    }

    #[test]
    fn type_error_reports_line() {
        let err = parse_config_str("api_endpoint = \"\"\ncache_timeout = \"ten\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains(">>>"), "{msg}");
    }
}
