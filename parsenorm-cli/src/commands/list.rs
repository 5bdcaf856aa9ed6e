//! List command implementation

use anyhow::Result;
use clap::Subcommand;
use parsenorm_core::LanguageMap;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List language codes and the tags that resolve to them
    Languages,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        for line in self.lines() {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Languages => {
                let languages = LanguageMap::default();
                languages
                    .codes()
                    .into_iter()
                    .map(|code| {
                        let tags: Vec<&str> = languages
                            .aliases()
                            .filter(|(tag, target)| *target == code && *tag != code)
                            .map(|(tag, _)| tag)
                            .collect();
                        if tags.is_empty() {
                            code.to_string()
                        } else {
                            format!("{code}\t{}", tags.join(", "))
                        }
                    })
                    .collect()
            }
            ListCommands::Formats => vec![
                "json\tJSON array with one response per request".to_string(),
                "text\tOne tab-separated line per token".to_string(),
                "markdown\tMarkdown token tables".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages() {
        let lines = ListCommands::Languages.lines();
        assert!(lines.iter().any(|line| line.starts_with("de\t") && line.contains("de_AT")));
        assert!(lines.iter().any(|line| line.starts_with("en\t") && line.contains("en_US")));
    }

    #[test]
    fn test_formats() {
        let lines = ListCommands::Formats.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("json"));
    }
}
