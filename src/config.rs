use confique::Config as DeriveConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "json-style-editor.toml";

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Spaces per nesting level in the preview, exports and printed output.
    #[config(env = "JSON_STYLE_EDITOR_INDENT", default = 2)]
    pub indent: usize,

    /// Where `Ctrl+S` writes the current document.
    #[config(env = "JSON_STYLE_EDITOR_EXPORT_PATH", default = "data.json")]
    pub export_path: PathBuf,

    /// Log file. The interactive editor owns the terminal, so without one it
    /// does not log at all.
    #[config(env = "JSON_STYLE_EDITOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[config(env = "JSON_STYLE_EDITOR_LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Show the live JSON preview next to the form.
    #[config(env = "JSON_STYLE_EDITOR_PREVIEW", default = true)]
    pub preview: bool,
}

impl Config {
    /// Environment first, then the TOML file, then built-in defaults. The
    /// default file is only read when present.
    pub fn load_from(path: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Self::builder().env();
        match path {
            Some(path) => builder = builder.file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    builder = builder.file(fallback);
                }
            }
        }
        builder.load()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::PathBuf;

    #[test]
    fn file_values_override_defaults() {
        let dir = std::env::temp_dir().join(format!("json-style-editor-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("editor.toml");
        std::fs::write(&path, "indent = 4\npreview = false\n").expect("write config");

        let config = Config::load_from(Some(&path)).expect("config loads");
        assert_eq!(config.indent, 4);
        assert!(!config.preview);
        assert_eq!(config.export_path, PathBuf::from("data.json"));
        assert_eq!(config.log_file, None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
