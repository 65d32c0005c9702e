use anyhow::{bail, Context};
use serde::Deserialize;

use crate::encoding::{Charset, Registry, RegistryBuilder};

/// Which codecs an application registers, as read from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CodecConfig {
    pub default_charset: String,
    /// Charsets to register. Empty means every built-in codec.
    #[serde(default)]
    pub charsets: Vec<String>,
}

impl Registry {
    pub fn from_config(config: &CodecConfig) -> anyhow::Result<Registry> {
        let builtin = Registry::builtin();
        let mut builder = RegistryBuilder::new();
        if config.charsets.is_empty() {
            for charset in Charset::ALL {
                if let Some(codec) = builtin.entry(*charset) {
                    builder.register_erased(codec.clone());
                }
            }
        }
        for name in &config.charsets {
            let charset = Charset::from_name(name)
                .with_context(|| format!("in `charsets`: `{name}`"))?;
            let codec = builtin
                .entry(charset)
                .with_context(|| format!("in `charsets`: no codec for {charset}"))?;
            builder.register_erased(codec.clone());
        }

        let default = Charset::from_name(&config.default_charset)
            .with_context(|| format!("in `default-charset`: `{}`", config.default_charset))?;
        let registry = builder.default_charset(default).build();
        if !registry.contains(default) {
            bail!("in `default-charset`: {default} is not among the registered charsets");
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> CodecConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            parse(r#"{"default-charset": "UTF-8"}"#),
            CodecConfig {
                default_charset: "UTF-8".to_owned(),
                charsets: vec![],
            }
        );
        assert!(serde_json::from_str::<CodecConfig>(r#"{"default_charset": "UTF-8"}"#).is_err());
    }

    #[test]
    fn test_from_config_restricts_charsets() {
        let registry = Registry::from_config(&parse(
            r#"{"default-charset": "iso8859-1", "charsets": ["ISO-8859-1", "utf-8"]}"#,
        ))
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_charset(), Some(Charset::ISO_8859_1));
        assert!(registry.lookup(Charset::UCS_2).is_err());
    }

    #[test]
    fn test_from_config_all_builtins() {
        let registry = Registry::from_config(&parse(r#"{"default-charset": "UTF-16"}"#)).unwrap();
        assert_eq!(registry.len(), Registry::builtin().len());
        assert_eq!(
            registry.default_codec().map(|codec| codec.charset()),
            Some(Charset::UTF_16)
        );
    }

    #[test]
    fn test_from_config_errors_name_the_setting() {
        let err = Registry::from_config(&parse(
            r#"{"default-charset": "UTF-8", "charsets": ["bogus"]}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "in `charsets`: `bogus`");

        let err = Registry::from_config(&parse(
            r#"{"default-charset": "UTF-8", "charsets": ["Shift_JIS"]}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "in `charsets`: no codec for Shift_JIS");

        let err = Registry::from_config(&parse(
            r#"{"default-charset": "UCS-2", "charsets": ["UTF-8"]}"#,
        ))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "in `default-charset`: ISO-10646-UCS-2 is not among the registered charsets"
        );
    }
}
